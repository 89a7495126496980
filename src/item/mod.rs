//! Item collaborator contracts
//!
//! The host server owns item representation; this crate only needs to know
//! whether an item stores enchantments or uses them, what it currently
//! carries, whether a kind could legally be applied to it, and how to clone
//! it with a forced enchantment write.

use serde::{Deserialize, Serialize};

use crate::enchant::{EnchantmentKind, EnchantmentSet};

/// How an item relates to its enchantments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A book: holds enchantments without using them
    Storage,
    /// A tool, weapon, or armor piece: enchantments affect gameplay
    Physical,
}

/// Capability query: could `kind` legally be applied to this item?
///
/// The engine probes candidates at a fixed test level to find out whether a
/// kind is scalable and compatible with the item type. A `false` answer
/// means "skip this candidate"; nothing is thrown or propagated.
pub trait ApplyProbe {
    /// Whether applying `kind` at `level` would be accepted by the host's
    /// normal validity rules
    fn can_apply(&self, kind: &EnchantmentKind, level: u32) -> bool;
}

/// Read-and-clone view of one merge slot
pub trait ItemView: ApplyProbe {
    /// Storage or physical
    fn kind(&self) -> ItemKind;

    /// The enchantments this item carries: stored enchantments for a
    /// storage item, bound enchantments for a physical one
    fn enchantments(&self) -> &EnchantmentSet;

    /// Clone this item with `kind` forcibly set to `level`, bypassing the
    /// host's level-validity restriction
    fn with_enchantment(&self, kind: &EnchantmentKind, level: u32) -> Self
    where
        Self: Sized;
}
