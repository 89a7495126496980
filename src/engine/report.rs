//! Evaluation report types
//!
//! Defines the `EvalReport` structure returned by the engine, along with
//! the upgrade decision and machine-readable decline reasons.

use serde::{Deserialize, Serialize};

use crate::enchant::EnchantmentKind;

/// The upgrade decision: which kind, the resulting level, and the XP cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Enchantment kind being extended or transferred
    pub kind: EnchantmentKind,

    /// Level on the result item
    pub level: u32,

    /// Experience-point cost, displayed as both minimum and maximum
    /// repair cost
    pub cost: u32,
}

/// The identical (kind, level) pair shared by both sides, when one exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedPair {
    /// Shared kind
    pub kind: EnchantmentKind,

    /// Shared level on both sides
    pub level: u32,
}

/// Machine-readable reasons the engine declined to upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum DeclineReason {
    /// The two sides share no identical (kind, level) pair
    NoMatchingPair,

    /// The selected kind has no extension rule
    NotExtendable(EnchantmentKind),

    /// The matched level is below the extension window
    BelowWindow {
        kind: EnchantmentKind,
        level: u32,
        first_extended: u32,
    },

    /// The matched level is already at the rule's ceiling
    AtCeiling {
        kind: EnchantmentKind,
        level: u32,
        ceiling: u32,
    },

    /// No right-side kind passed the capability probe
    NoCompatibleKind,

    /// The probed kind's original level falls outside the rule's window
    OutsideWindow {
        kind: EnchantmentKind,
        level: u32,
        first_extended: u32,
        ceiling: u32,
    },

    /// The cost table has no entry for the level being charged
    CostUnavailable { level: u32 },
}

impl DeclineReason {
    /// Convert to machine-readable string format
    /// Example: "NOT_EXTENDABLE:sharpness", "AT_CEILING:unbreaking:10"
    pub fn to_machine_string(&self) -> String {
        match self {
            DeclineReason::NoMatchingPair => "NO_MATCHING_PAIR".to_string(),
            DeclineReason::NotExtendable(kind) => format!("NOT_EXTENDABLE:{}", kind),
            DeclineReason::BelowWindow { kind, level, .. } => {
                format!("BELOW_WINDOW:{}:{}", kind, level)
            }
            DeclineReason::AtCeiling { kind, level, .. } => {
                format!("AT_CEILING:{}:{}", kind, level)
            }
            DeclineReason::NoCompatibleKind => "NO_COMPATIBLE_KIND".to_string(),
            DeclineReason::OutsideWindow { kind, level, .. } => {
                format!("OUTSIDE_WINDOW:{}:{}", kind, level)
            }
            DeclineReason::CostUnavailable { level } => format!("COST_UNAVAILABLE:{}", level),
        }
    }
}

/// Result of evaluating one merge preview
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvalReport {
    /// The decision - None means "no change", the host's default merge
    /// behavior applies
    pub upgrade: Option<Upgrade>,

    /// The shared (kind, level) pair, when matching found one
    pub matched: Option<MatchedPair>,

    /// The kind selected by the capability probe, when probing ran and hit
    pub probed: Option<EnchantmentKind>,

    /// Machine-readable decline reasons (empty on upgrade)
    pub declined: Vec<DeclineReason>,
}

impl EvalReport {
    /// Create a declined report with the given reason
    pub(crate) fn declined(reason: DeclineReason) -> Self {
        Self {
            upgrade: None,
            matched: None,
            probed: None,
            declined: vec![reason],
        }
    }

    /// Whether the engine decided on an upgrade
    pub fn upgraded(&self) -> bool {
        self.upgrade.is_some()
    }

    /// Get decline reasons as machine-readable strings
    pub fn decline_reason_strings(&self) -> Vec<String> {
        self.declined.iter().map(|r| r.to_machine_string()).collect()
    }
}
