//! Explain output for merge evaluations
//!
//! Provides structured JSON and human-readable explanations of engine
//! decisions for diagnostic purposes.

use serde::{Deserialize, Serialize};

use super::{EvalReport, ExtensionEngine, MergeInput};
use crate::enchant::EnchantmentSet;

/// Explanation output for one merge evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// Left side's enchantments
    pub left: EnchantmentSet,

    /// Whether the left slot held a storage item
    pub left_is_storage: bool,

    /// Right side's enchantments
    pub right: EnchantmentSet,

    /// Whether the right slot held a storage item
    pub right_is_storage: bool,

    /// Whether an upgrade was decided
    pub upgraded: bool,

    /// The decision, when one was made
    pub upgrade: Option<UpgradeOutput>,

    /// Machine-readable decline reasons
    pub decline_reasons: Vec<String>,

    /// The extension rules in effect, sorted by kind
    pub effective_rules: Vec<EffectiveRule>,

    /// Human-readable explanation
    pub explanation: String,
}

/// Decision fields in the explain output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeOutput {
    pub kind: String,
    pub level: u32,
    pub cost: u32,
}

/// One effective rule row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveRule {
    pub kind: String,
    pub first_extended: u32,
    pub ceiling: u32,
}

impl ExplainOutput {
    /// Create an ExplainOutput from an evaluation report
    pub fn from_report(
        engine: &ExtensionEngine,
        input: &MergeInput<'_>,
        report: &EvalReport,
    ) -> Self {
        let upgrade = report.upgrade.as_ref().map(|u| UpgradeOutput {
            kind: u.kind.as_str().to_string(),
            level: u.level,
            cost: u.cost,
        });

        let mut effective_rules: Vec<EffectiveRule> = engine
            .rules()
            .iter()
            .map(|(kind, rule)| EffectiveRule {
                kind: kind.as_str().to_string(),
                first_extended: rule.first_extended,
                ceiling: rule.ceiling,
            })
            .collect();
        effective_rules.sort_by(|a, b| a.kind.cmp(&b.kind));

        let explanation = Self::generate_explanation(report);

        Self {
            left: input.left.clone(),
            left_is_storage: input.left_is_storage,
            right: input.right.clone(),
            right_is_storage: input.right_is_storage,
            upgraded: report.upgraded(),
            upgrade,
            decline_reasons: report.decline_reason_strings(),
            effective_rules,
            explanation,
        }
    }

    /// Generate human-readable explanation
    fn generate_explanation(report: &EvalReport) -> String {
        let mut lines = Vec::new();

        match &report.upgrade {
            Some(upgrade) => {
                lines.push("Decision: UPGRADE".to_string());
                lines.push(format!(
                    "Result: {} {} for {} XP",
                    upgrade.kind, upgrade.level, upgrade.cost
                ));
                if let Some(matched) = &report.matched {
                    lines.push(format!(
                        "Matched pair: {} {} on both sides",
                        matched.kind, matched.level
                    ));
                }
                if let Some(probed) = &report.probed {
                    lines.push(format!("Selected by capability probe: {}", probed));
                }
            }
            None => {
                lines.push("Decision: NO CHANGE".to_string());
                if !report.declined.is_empty() {
                    lines.push("Reasons:".to_string());
                    for reason in &report.declined {
                        lines.push(format!("  - {}", reason.to_machine_string()));
                    }
                }
            }
        }

        lines.join("\n")
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut output = self.explanation.clone();

        output.push_str("\n\n--- Effective Rules ---\n");
        for rule in &self.effective_rules {
            output.push_str(&format!(
                "{}: levels {}..={}\n",
                rule.kind, rule.first_extended, rule.ceiling
            ));
        }

        output
    }
}
