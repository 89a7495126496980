//! Preview event lifecycle tests
//!
//! Exercises the handler end-to-end with mock collaborators: upstream
//! filters, synchronous result application, and the deferred cost display
//! and viewer refresh.

use anvil_extend::mock::{Compat, MockItem, MockPreviewEvent};
use anvil_extend::{
    CostTable, EnchantmentKind, EnchantmentSet, ExtensionEngine, PreviewHandler, PreviewOutcome,
    RuleTable, SkipReason, TickQueue,
};

fn handler(queue: &TickQueue) -> PreviewHandler<&TickQueue> {
    let engine = ExtensionEngine::new(RuleTable::vanilla(), CostTable::vanilla()).unwrap();
    PreviewHandler::new(engine, queue)
}

fn set(pairs: &[(EnchantmentKind, u32)]) -> EnchantmentSet {
    pairs.iter().cloned().collect()
}

#[test]
fn test_empty_slot_leaves_event_untouched() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let mut event = MockPreviewEvent::with_optional_slots(
        Some(MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)]))),
        None,
    );

    let outcome = handler.on_prepare_merge(&mut event);
    assert!(matches!(
        outcome,
        PreviewOutcome::NotEligible(SkipReason::EmptySlot)
    ));
    assert!(event.result().is_none());
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_storage_onto_physical_is_filtered_before_the_engine() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    // A book on the right, a tool on the left: the handler rejects this
    // before the engine ever runs.
    let left = MockItem::physical(set(&[(EnchantmentKind::UNBREAKING, 3)]));
    let right = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)]));
    let mut event = MockPreviewEvent::with_slots(left, right);

    let outcome = handler.on_prepare_merge(&mut event);
    assert!(matches!(
        outcome,
        PreviewOutcome::NotEligible(SkipReason::StorageOntoPhysical)
    ));
    assert!(event.result().is_none());
    assert_eq!(queue.pending(), 0);
}

#[test]
fn test_book_into_book_applies_result_synchronously() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let left = MockItem::storage(set(&[
        (EnchantmentKind::MENDING, 1),
        (EnchantmentKind::UNBREAKING, 3),
    ]));
    let right = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)]));
    let mut event = MockPreviewEvent::with_slots(left, right);

    let outcome = handler.on_prepare_merge(&mut event);
    assert!(outcome.applied());

    // Result is set before the tick runs, with the bumped level forced in
    // and the rest of the left book intact.
    let result = event.result().expect("result should be set synchronously");
    assert_eq!(
        result.enchantments().level(&EnchantmentKind::UNBREAKING),
        Some(4)
    );
    assert_eq!(
        result.enchantments().level(&EnchantmentKind::MENDING),
        Some(1)
    );
}

#[test]
fn test_cost_and_refresh_wait_for_the_next_tick() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let left = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)]));
    let right = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)]));
    let mut event = MockPreviewEvent::with_slots(left, right);
    let ui = event.ui_handle();

    handler.on_prepare_merge(&mut event);

    // Nothing visible happens inside the callback.
    assert_eq!(ui.repair_cost(), None);
    assert_eq!(ui.refreshes(), 0);
    assert_eq!(queue.pending(), 1);

    queue.run_tick();

    // Cost lands as both min and max; every viewer refreshed once.
    assert_eq!(ui.repair_cost(), Some((5, 5)));
    assert_eq!(ui.refreshes(), 1);
}

#[test]
fn test_physical_pair_merge_end_to_end() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let left = MockItem::physical(set(&[(EnchantmentKind::EFFICIENCY, 5)]));
    let right = MockItem::physical(set(&[(EnchantmentKind::EFFICIENCY, 5)]));
    let mut event = MockPreviewEvent::with_slots(left, right);
    let ui = event.ui_handle();

    let outcome = handler.on_prepare_merge(&mut event);
    assert!(outcome.applied());

    let result = event.result().unwrap();
    assert_eq!(
        result.enchantments().level(&EnchantmentKind::EFFICIENCY),
        Some(6)
    );

    queue.run_tick();
    assert_eq!(ui.repair_cost(), Some((15, 15)));
}

#[test]
fn test_probe_transfer_end_to_end() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    // Physical source on the right (a storage right side never reaches the
    // engine with a physical left). Silk touch fails the probe, feather
    // falling passes and transfers at its original level.
    let left = MockItem::physical(EnchantmentSet::new())
        .with_compat(Compat::only(&[EnchantmentKind::FEATHER_FALLING]));
    let right = MockItem::physical(set(&[
        (EnchantmentKind::SILK_TOUCH, 1),
        (EnchantmentKind::FEATHER_FALLING, 5),
    ]));
    let mut event = MockPreviewEvent::with_slots(left, right);
    let ui = event.ui_handle();

    let outcome = handler.on_prepare_merge(&mut event);
    assert!(outcome.applied());

    let result = event.result().unwrap();
    assert_eq!(
        result.enchantments().level(&EnchantmentKind::FEATHER_FALLING),
        Some(5)
    );
    assert_eq!(
        result.enchantments().level(&EnchantmentKind::SILK_TOUCH),
        None
    );

    queue.run_tick();
    assert_eq!(ui.repair_cost(), Some((10, 10)));
}

#[test]
fn test_probe_consulted_in_right_insertion_order() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let left = MockItem::physical(EnchantmentSet::new()).with_compat(Compat::None);
    let right = MockItem::physical(set(&[
        (EnchantmentKind::SILK_TOUCH, 1),
        (EnchantmentKind::SHARPNESS, 3),
        (EnchantmentKind::FEATHER_FALLING, 5),
    ]));
    let mut event = MockPreviewEvent::with_slots(left, right);

    handler.on_prepare_merge(&mut event);

    let calls = event.left().unwrap().probe_calls();
    let kinds: Vec<&str> = calls.iter().map(|(kind, _)| kind.as_str()).collect();
    assert_eq!(kinds, vec!["silk_touch", "sharpness", "feather_falling"]);
    assert!(calls.iter().all(|(_, level)| *level == 2));
}

#[test]
fn test_declined_merge_leaves_event_untouched() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let left = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 10)]));
    let right = MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 10)]));
    let mut event = MockPreviewEvent::with_slots(left, right);
    let ui = event.ui_handle();

    let outcome = handler.on_prepare_merge(&mut event);
    match outcome {
        PreviewOutcome::Evaluated(report) => {
            assert!(!report.upgraded());
        }
        other => panic!("expected an evaluated outcome, got {other:?}"),
    }

    assert!(event.result().is_none());
    assert_eq!(queue.pending(), 0);
    queue.run_tick();
    assert_eq!(ui.repair_cost(), None);
    assert_eq!(ui.refreshes(), 0);
}

#[test]
fn test_two_previews_share_one_tick() {
    let queue = TickQueue::new();
    let handler = handler(&queue);

    let mut first = MockPreviewEvent::with_slots(
        MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)])),
        MockItem::storage(set(&[(EnchantmentKind::UNBREAKING, 3)])),
    );
    let mut second = MockPreviewEvent::with_slots(
        MockItem::storage(set(&[(EnchantmentKind::EFFICIENCY, 5)])),
        MockItem::storage(set(&[(EnchantmentKind::EFFICIENCY, 5)])),
    );

    handler.on_prepare_merge(&mut first);
    handler.on_prepare_merge(&mut second);
    assert_eq!(queue.pending(), 2);

    assert_eq!(queue.run_tick(), 2);
    assert_eq!(first.ui_handle().repair_cost(), Some((5, 5)));
    assert_eq!(second.ui_handle().repair_cost(), Some((15, 15)));
}
