//! Merge preview event handling
//!
//! `PreviewHandler` is the glue between the host's merge-preview event and
//! the engine: it applies the upstream eligibility filters, evaluates, and
//! on an upgrade decision sets the result item synchronously while
//! deferring the displayed cost and viewer refresh to the next tick.

use serde::{Deserialize, Serialize};

use crate::engine::{EvalReport, ExtensionEngine, MergeInput};
use crate::item::{ItemKind, ItemView};
use crate::scheduler::TickScheduler;

/// Handle to the merge UI that survives past the event callback
///
/// Implementations are cheap clones of host state (the open anvil view and
/// its viewers); the deferred task owns one.
pub trait PreviewUi {
    /// Set the displayed repair cost range
    fn set_repair_cost(&self, min: u32, max: u32);

    /// Re-send UI state to every party currently viewing the merge
    fn refresh_viewers(&self);
}

/// The host's merge-preview event
pub trait PreviewEvent {
    /// The host's item representation
    type Item: ItemView;

    /// UI handle type captured by deferred tasks
    type Ui: PreviewUi + 'static;

    /// Left input slot, if occupied
    fn left(&self) -> Option<&Self::Item>;

    /// Right input slot, if occupied
    fn right(&self) -> Option<&Self::Item>;

    /// Set the preview's result item
    fn set_result(&mut self, item: Self::Item);

    /// A UI handle for deferred work
    fn ui(&self) -> Self::Ui;
}

/// Why the handler left an event untouched without consulting the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// One or both input slots are empty
    EmptySlot,

    /// The right side is a storage item while the left side is not;
    /// storage sources only pour into other storage items here
    StorageOntoPhysical,
}

/// Outcome of handling one preview event
#[derive(Debug, Clone)]
pub enum PreviewOutcome {
    /// An upstream filter applied; the event was not modified and the
    /// engine never ran
    NotEligible(SkipReason),

    /// The engine ran; the report says whether an upgrade was applied
    Evaluated(EvalReport),
}

impl PreviewOutcome {
    /// Whether an upgrade decision was applied to the event
    pub fn applied(&self) -> bool {
        matches!(self, Self::Evaluated(report) if report.upgraded())
    }
}

/// Handles merge-preview events against one engine and scheduler
pub struct PreviewHandler<S> {
    engine: ExtensionEngine,
    scheduler: S,
}

impl<S: TickScheduler> PreviewHandler<S> {
    /// Create a handler
    pub fn new(engine: ExtensionEngine, scheduler: S) -> Self {
        Self { engine, scheduler }
    }

    /// The engine in use
    pub fn engine(&self) -> &ExtensionEngine {
        &self.engine
    }

    /// Handle one preview event
    ///
    /// On an upgrade decision the result item is set before returning; the
    /// displayed cost and the viewer refresh run on the next tick.
    pub fn on_prepare_merge<E: PreviewEvent>(&self, event: &mut E) -> PreviewOutcome {
        let (left, right) = match (event.left(), event.right()) {
            (Some(left), Some(right)) => (left, right),
            _ => return PreviewOutcome::NotEligible(SkipReason::EmptySlot),
        };

        if right.kind() == ItemKind::Storage && left.kind() != ItemKind::Storage {
            log::debug!("merge skipped: storage source onto physical item");
            return PreviewOutcome::NotEligible(SkipReason::StorageOntoPhysical);
        }

        let input = MergeInput::new(
            left.enchantments(),
            left.kind() == ItemKind::Storage,
            right.enchantments(),
            right.kind() == ItemKind::Storage,
        );
        let report = self.engine.evaluate(&input, left);

        let upgrade = match &report.upgrade {
            Some(upgrade) => upgrade.clone(),
            None => return PreviewOutcome::Evaluated(report),
        };

        log::debug!(
            "merge upgrade: {} -> {} for {} XP",
            upgrade.kind,
            upgrade.level,
            upgrade.cost
        );

        let result = left.with_enchantment(&upgrade.kind, upgrade.level);
        let ui = event.ui();
        let cost = upgrade.cost;
        self.scheduler.run_next_tick(Box::new(move || {
            ui.set_repair_cost(cost, cost);
            ui.refresh_viewers();
        }));
        event.set_result(result);

        PreviewOutcome::Evaluated(report)
    }
}
