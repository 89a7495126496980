//! Mock item with configurable probe compatibility

use std::cell::RefCell;
use std::collections::HashSet;

use crate::enchant::{EnchantmentKind, EnchantmentSet};
use crate::item::{ApplyProbe, ItemKind, ItemView};

/// Probe compatibility policy for a mock item
#[derive(Debug, Clone)]
pub enum Compat {
    /// Every kind passes the probe
    All,
    /// No kind passes the probe
    None,
    /// Only the listed kinds pass the probe
    Only(HashSet<EnchantmentKind>),
}

impl Compat {
    /// Allowlist constructor
    pub fn only(kinds: &[EnchantmentKind]) -> Self {
        Self::Only(kinds.iter().cloned().collect())
    }

    fn accepts(&self, kind: &EnchantmentKind) -> bool {
        match self {
            Compat::All => true,
            Compat::None => false,
            Compat::Only(kinds) => kinds.contains(kind),
        }
    }
}

/// In-process stand-in for a host item
///
/// Records every probe call so tests can assert the probe order and level.
#[derive(Debug, Clone)]
pub struct MockItem {
    kind: ItemKind,
    enchants: EnchantmentSet,
    compat: Compat,
    probe_log: RefCell<Vec<(EnchantmentKind, u32)>>,
}

impl MockItem {
    /// A storage item (book) holding the given enchantments
    pub fn storage(enchants: EnchantmentSet) -> Self {
        Self {
            kind: ItemKind::Storage,
            enchants,
            compat: Compat::All,
            probe_log: RefCell::new(Vec::new()),
        }
    }

    /// A physical item (tool/armor/weapon) bound to the given enchantments
    pub fn physical(enchants: EnchantmentSet) -> Self {
        Self {
            kind: ItemKind::Physical,
            enchants,
            compat: Compat::All,
            probe_log: RefCell::new(Vec::new()),
        }
    }

    /// Set the probe compatibility policy
    pub fn with_compat(mut self, compat: Compat) -> Self {
        self.compat = compat;
        self
    }

    /// Probe calls observed so far, in order
    pub fn probe_calls(&self) -> Vec<(EnchantmentKind, u32)> {
        self.probe_log.borrow().clone()
    }
}

impl ApplyProbe for MockItem {
    fn can_apply(&self, kind: &EnchantmentKind, level: u32) -> bool {
        self.probe_log.borrow_mut().push((kind.clone(), level));
        self.compat.accepts(kind)
    }
}

impl ItemView for MockItem {
    fn kind(&self) -> ItemKind {
        self.kind
    }

    fn enchantments(&self) -> &EnchantmentSet {
        &self.enchants
    }

    fn with_enchantment(&self, kind: &EnchantmentKind, level: u32) -> Self {
        let mut clone = self.clone();
        clone.probe_log = RefCell::new(Vec::new());
        clone.enchants.set(kind.clone(), level);
        clone
    }
}
