//! Anvil Extend - beyond-vanilla enchantment merges
//!
//! This crate implements the merge gate that decides, for two items placed
//! in an anvil-style grid, whether an enchantment may be pushed past its
//! vanilla maximum, at what experience cost, and what the resulting item
//! carries. The host server plugs in through the `item`, `event`, and
//! `scheduler` collaborator traits.

pub mod enchant;
pub mod engine;
pub mod event;
pub mod item;
pub mod mock;
pub mod scheduler;
pub mod table;

pub use enchant::{EnchantmentKind, EnchantmentSet};
pub use engine::{
    DeclineReason, EvalReport, ExplainOutput, ExtensionEngine, MatchedPair, MergeInput, Upgrade,
    PROBE_LEVEL,
};
pub use event::{PreviewEvent, PreviewHandler, PreviewOutcome, PreviewUi, SkipReason};
pub use item::{ApplyProbe, ItemKind, ItemView};
pub use scheduler::{TickQueue, TickScheduler};
pub use table::{ConfigError, CostTable, ExtensionRule, RuleTable, TableSnapshot};
