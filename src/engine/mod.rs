//! Extension rule engine
//!
//! Decides whether the two sides of a merge preview may produce a
//! beyond-vanilla enchantment level. The engine is a pure function over the
//! injected tables plus a capability probe; every ineligible path resolves
//! to "no change" and lets the host's default merge behavior stand.
//!
//! Two cases:
//!
//! - left side is storage: the first identical (kind, level) pair shared by
//!   both sides is bumped one level, if a rule's window allows it.
//! - left side is physical: a shared pair is handled the same way; with no
//!   shared pair, the first right-side kind the item could accept at all is
//!   transferred at its original level, if it lands inside a rule's window.

mod explain;
mod report;

pub use explain::{EffectiveRule, ExplainOutput, UpgradeOutput};
pub use report::{DeclineReason, EvalReport, MatchedPair, Upgrade};

use crate::enchant::{EnchantmentKind, EnchantmentSet};
use crate::item::ApplyProbe;
use crate::table::{validate_tables, ConfigError, CostTable, RuleTable};

/// Fixed test level for the capability probe
///
/// Level 2 distinguishes scalable kinds from single-level ones (silk touch
/// and the like); the probed kind's actual level is applied, never this one.
pub const PROBE_LEVEL: u32 = 2;

/// Borrowed view of one merge preview's two sides
#[derive(Debug, Clone, Copy)]
pub struct MergeInput<'a> {
    /// Left slot's enchantments
    pub left: &'a EnchantmentSet,

    /// Whether the left slot holds a storage item
    pub left_is_storage: bool,

    /// Right slot's enchantments (stored or bound)
    pub right: &'a EnchantmentSet,

    /// Whether the right slot holds a storage item
    pub right_is_storage: bool,
}

impl<'a> MergeInput<'a> {
    /// Create an input from both sides' sets and storage flags
    pub fn new(
        left: &'a EnchantmentSet,
        left_is_storage: bool,
        right: &'a EnchantmentSet,
        right_is_storage: bool,
    ) -> Self {
        Self {
            left,
            left_is_storage,
            right,
            right_is_storage,
        }
    }
}

/// The engine: validated tables plus the decision procedure
#[derive(Debug)]
pub struct ExtensionEngine {
    rules: RuleTable,
    costs: CostTable,
}

impl ExtensionEngine {
    /// Create an engine over the given tables
    ///
    /// Fails fast on configuration errors: a malformed rule window or a
    /// chargeable level missing from the cost table refuses construction.
    pub fn new(rules: RuleTable, costs: CostTable) -> Result<Self, ConfigError> {
        validate_tables(&rules, &costs)?;
        Ok(Self { rules, costs })
    }

    /// The rule table in effect
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The cost table in effect
    pub fn costs(&self) -> &CostTable {
        &self.costs
    }

    /// Evaluate one merge preview
    ///
    /// Pure and synchronous: identical inputs always produce identical
    /// reports. The probe answers for the left item and is only consulted
    /// when the left side is physical and no pair matched.
    pub fn evaluate(&self, input: &MergeInput<'_>, probe: &dyn ApplyProbe) -> EvalReport {
        let report = if input.left_is_storage {
            self.evaluate_storage(input)
        } else {
            self.evaluate_physical(input, probe)
        };

        log::trace!(
            "merge eval: upgrade={:?} declined={:?}",
            report.upgrade,
            report.decline_reason_strings()
        );
        report
    }

    /// Left side is a storage item: pair matching only
    fn evaluate_storage(&self, input: &MergeInput<'_>) -> EvalReport {
        match find_matching_pair(input.left, input.right) {
            Some((kind, level)) => self.extend_matched(kind, level),
            None => EvalReport::declined(DeclineReason::NoMatchingPair),
        }
    }

    /// Left side is a physical item: pair matching, then probe fallback
    fn evaluate_physical(&self, input: &MergeInput<'_>, probe: &dyn ApplyProbe) -> EvalReport {
        if let Some((kind, level)) = find_matching_pair(input.left, input.right) {
            return self.extend_matched(kind, level);
        }

        // No shared pair: select the first right-side kind the item could
        // accept at all. Selection is final; a ruleless or out-of-window
        // selection declines without reconsidering later candidates.
        let selected = input
            .right
            .iter()
            .find(|(kind, _)| probe.can_apply(kind, PROBE_LEVEL))
            .map(|(kind, level)| (kind.clone(), level));

        let (kind, level) = match selected {
            Some(pair) => pair,
            None => return EvalReport::declined(DeclineReason::NoCompatibleKind),
        };

        let probed = Some(kind.clone());
        let rule = match self.rules.rule(&kind) {
            Some(rule) => rule,
            None => {
                return EvalReport {
                    probed,
                    ..EvalReport::declined(DeclineReason::NotExtendable(kind))
                }
            }
        };

        if level < rule.first_extended || level > rule.ceiling {
            return EvalReport {
                probed,
                ..EvalReport::declined(DeclineReason::OutsideWindow {
                    kind,
                    level,
                    first_extended: rule.first_extended,
                    ceiling: rule.ceiling,
                })
            };
        }

        let cost = match self.costs.cost(level) {
            Some(cost) => cost,
            None => {
                return EvalReport {
                    probed,
                    ..EvalReport::declined(DeclineReason::CostUnavailable { level })
                }
            }
        };

        EvalReport {
            upgrade: Some(Upgrade { kind, level, cost }),
            matched: None,
            probed,
            declined: vec![],
        }
    }

    /// A pair matched: bump one level if the rule's window allows it
    fn extend_matched(&self, kind: EnchantmentKind, level: u32) -> EvalReport {
        let matched = Some(MatchedPair {
            kind: kind.clone(),
            level,
        });

        let rule = match self.rules.rule(&kind) {
            Some(rule) => rule,
            None => {
                return EvalReport {
                    matched,
                    ..EvalReport::declined(DeclineReason::NotExtendable(kind))
                }
            }
        };

        // level + 1 >= first_extended admits the last vanilla level as a
        // starting point; level < ceiling stops the bump at the cap.
        if level + 1 < rule.first_extended {
            return EvalReport {
                matched,
                ..EvalReport::declined(DeclineReason::BelowWindow {
                    kind,
                    level,
                    first_extended: rule.first_extended,
                })
            };
        }
        if level >= rule.ceiling {
            return EvalReport {
                matched,
                ..EvalReport::declined(DeclineReason::AtCeiling {
                    kind,
                    level,
                    ceiling: rule.ceiling,
                })
            };
        }

        let cost = match self.costs.cost(level + 1) {
            Some(cost) => cost,
            None => {
                return EvalReport {
                    matched,
                    ..EvalReport::declined(DeclineReason::CostUnavailable { level: level + 1 })
                }
            }
        };

        EvalReport {
            upgrade: Some(Upgrade {
                kind,
                level: level + 1,
                cost,
            }),
            matched,
            probed: None,
            declined: vec![],
        }
    }
}

/// First (kind, level) pair in left's insertion order that appears
/// identically in right
///
/// First-hit tie-breaking is normative: when several pairs match, left's
/// insertion order decides, not the highest level.
fn find_matching_pair(
    left: &EnchantmentSet,
    right: &EnchantmentSet,
) -> Option<(EnchantmentKind, u32)> {
    left.iter()
        .find(|(kind, level)| right.contains(kind, *level))
        .map(|(kind, level)| (kind.clone(), level))
}
