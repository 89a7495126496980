//! Enchantment vocabulary
//!
//! `EnchantmentKind` is an opaque identifier for an enchantment type; the
//! host knows dozens of kinds and this crate only ever configures a subset.
//! `EnchantmentSet` is the kind -> level mapping carried by an item or a
//! storage book. Iteration order is insertion order, which makes the
//! engine's first-match scan deterministic.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Opaque identifier for an enchantment type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnchantmentKind(Cow<'static, str>);

impl EnchantmentKind {
    /// Tool/armor durability extension
    pub const UNBREAKING: EnchantmentKind = EnchantmentKind::from_static("unbreaking");

    /// Mining speed
    pub const EFFICIENCY: EnchantmentKind = EnchantmentKind::from_static("efficiency");

    /// Fall damage reduction
    pub const FEATHER_FALLING: EnchantmentKind = EnchantmentKind::from_static("feather_falling");

    /// Melee damage
    pub const SHARPNESS: EnchantmentKind = EnchantmentKind::from_static("sharpness");

    /// Drop multiplier
    pub const FORTUNE: EnchantmentKind = EnchantmentKind::from_static("fortune");

    /// Repair-with-experience; single-level
    pub const MENDING: EnchantmentKind = EnchantmentKind::from_static("mending");

    /// Block self-drop; single-level, not scalable
    pub const SILK_TOUCH: EnchantmentKind = EnchantmentKind::from_static("silk_touch");

    /// Create a kind from a static identifier
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Create a kind from a host-provided identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// The identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EnchantmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A kind -> level mapping with at most one entry per kind
///
/// Levels are always >= 1. Backed by a vector so that iteration follows
/// insertion order; sets are small (a handful of enchantments per item), so
/// linear lookup is fine and evaluation stays allocation-free.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnchantmentSet {
    entries: Vec<(EnchantmentKind, u32)>,
}

impl EnchantmentSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for tests and table construction
    pub fn with(mut self, kind: EnchantmentKind, level: u32) -> Self {
        self.set(kind, level);
        self
    }

    /// Insert or overwrite a kind's level
    ///
    /// An existing kind keeps its position; a new kind appends.
    pub fn set(&mut self, kind: EnchantmentKind, level: u32) {
        debug_assert!(level >= 1, "enchantment levels start at 1");
        match self.entries.iter().position(|(k, _)| *k == kind) {
            Some(index) => self.entries[index].1 = level,
            None => self.entries.push((kind, level)),
        }
    }

    /// The level for a kind, if present
    pub fn level(&self, kind: &EnchantmentKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, level)| *level)
    }

    /// Whether the set holds exactly this (kind, level) pair
    pub fn contains(&self, kind: &EnchantmentKind, level: u32) -> bool {
        self.level(kind) == Some(level)
    }

    /// Iterate pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&EnchantmentKind, u32)> {
        self.entries.iter().map(|(k, level)| (k, *level))
    }

    /// Number of enchantments held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EnchantmentKind, u32)> for EnchantmentSet {
    fn from_iter<I: IntoIterator<Item = (EnchantmentKind, u32)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (kind, level) in iter {
            set.set(kind, level);
        }
        set
    }
}
