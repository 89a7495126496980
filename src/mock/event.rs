//! Mock preview event and UI handle

use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{PreviewEvent, PreviewUi};

use super::MockItem;

/// Recorded UI state shared between the event and its handles
#[derive(Debug, Default)]
pub struct UiState {
    /// Last (min, max) repair cost set, if any
    pub repair_cost: Option<(u32, u32)>,

    /// How many viewer refreshes ran
    pub refreshes: u32,
}

/// Cheap-to-clone UI handle recording into shared state
#[derive(Debug, Clone, Default)]
pub struct MockUi {
    state: Rc<RefCell<UiState>>,
}

impl MockUi {
    /// Last repair cost set, if any
    pub fn repair_cost(&self) -> Option<(u32, u32)> {
        self.state.borrow().repair_cost
    }

    /// Number of viewer refreshes observed
    pub fn refreshes(&self) -> u32 {
        self.state.borrow().refreshes
    }
}

impl PreviewUi for MockUi {
    fn set_repair_cost(&self, min: u32, max: u32) {
        self.state.borrow_mut().repair_cost = Some((min, max));
    }

    fn refresh_viewers(&self) {
        self.state.borrow_mut().refreshes += 1;
    }
}

/// In-process stand-in for the host's merge-preview event
#[derive(Debug, Default)]
pub struct MockPreviewEvent {
    left: Option<MockItem>,
    right: Option<MockItem>,
    result: Option<MockItem>,
    ui: MockUi,
}

impl MockPreviewEvent {
    /// An event with both slots occupied
    pub fn with_slots(left: MockItem, right: MockItem) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            ..Self::default()
        }
    }

    /// An event with the given (possibly empty) slots
    pub fn with_optional_slots(left: Option<MockItem>, right: Option<MockItem>) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }

    /// The result item set by the handler, if any
    pub fn result(&self) -> Option<&MockItem> {
        self.result.as_ref()
    }

    /// The shared UI handle, for assertions
    pub fn ui_handle(&self) -> MockUi {
        self.ui.clone()
    }
}

impl PreviewEvent for MockPreviewEvent {
    type Item = MockItem;
    type Ui = MockUi;

    fn left(&self) -> Option<&MockItem> {
        self.left.as_ref()
    }

    fn right(&self) -> Option<&MockItem> {
        self.right.as_ref()
    }

    fn set_result(&mut self, item: MockItem) {
        self.result = Some(item);
    }

    fn ui(&self) -> MockUi {
        self.ui.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enchant::EnchantmentSet;

    #[test]
    fn test_ui_handle_shares_state() {
        let event = MockPreviewEvent::default();
        let handle = event.ui_handle();

        event.ui().set_repair_cost(5, 5);
        event.ui().refresh_viewers();

        assert_eq!(handle.repair_cost(), Some((5, 5)));
        assert_eq!(handle.refreshes(), 1);
    }

    #[test]
    fn test_slots_and_result() {
        let mut event = MockPreviewEvent::with_slots(
            MockItem::storage(EnchantmentSet::new()),
            MockItem::storage(EnchantmentSet::new()),
        );

        assert!(event.left().is_some());
        assert!(event.right().is_some());
        assert!(event.result().is_none());

        event.set_result(MockItem::storage(EnchantmentSet::new()));
        assert!(event.result().is_some());
    }
}
