//! Main-thread tick scheduling
//!
//! The host's UI/state API is not safe to call from inside an event
//! callback, so visual side effects are handed to a scheduler that runs
//! them on the same thread during a later tick. The contract is "run
//! later, same executor, FIFO"; tasks are deliberately not `Send`.

use std::cell::RefCell;
use std::collections::VecDeque;

/// A deferred unit of work
pub type Task = Box<dyn FnOnce()>;

/// Submits work to run on the host's main thread during a later tick
pub trait TickScheduler {
    /// Queue `task` for the next tick
    fn run_next_tick(&self, task: Task);
}

impl<T: TickScheduler + ?Sized> TickScheduler for &T {
    fn run_next_tick(&self, task: Task) {
        (**self).run_next_tick(task)
    }
}

/// FIFO tick queue
///
/// Tasks queued before a tick run during that tick, in submission order;
/// tasks queued while the tick is draining run on the following tick.
#[derive(Default)]
pub struct TickQueue {
    pending: RefCell<VecDeque<Task>>,
}

impl TickQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting for the next tick
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run one tick, returning how many tasks ran
    pub fn run_tick(&self) -> usize {
        let batch: VecDeque<Task> = self.pending.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl TickScheduler for TickQueue {
    fn run_next_tick(&self, task: Task) {
        self.pending.borrow_mut().push_back(task);
    }
}
