//! Extension rule and cost tables
//!
//! The tables are the whole configuration surface of the crate: which
//! enchantment kinds may be pushed past their vanilla maximum, how far, and
//! what each resulting level costs. They are built once at process start and
//! injected into the engine read-only; there is no runtime reconfiguration.

mod snapshot;

pub use snapshot::TableSnapshot;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::enchant::EnchantmentKind;

/// Extension window for one enchantment kind
///
/// `first_extended` is the first level normally unobtainable through vanilla
/// combination; `ceiling` is the hard cap this crate will ever produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRule {
    /// First beyond-vanilla level
    pub first_extended: u32,

    /// Highest level the rule allows
    pub ceiling: u32,
}

impl ExtensionRule {
    /// Create a rule covering `first_extended..=ceiling`
    pub fn new(first_extended: u32, ceiling: u32) -> Self {
        Self {
            first_extended,
            ceiling,
        }
    }
}

/// Immutable kind -> extension rule mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<EnchantmentKind, ExtensionRule>,
}

impl RuleTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style rule insert
    pub fn with(mut self, kind: EnchantmentKind, rule: ExtensionRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    /// The built-in extension table
    ///
    /// Unbreaking and efficiency cap at vanilla levels III and V, so their
    /// windows open at 4 and 6; feather falling caps at IV, window opens
    /// at 5. All extend to 10.
    pub fn vanilla() -> Self {
        Self::new()
            .with(EnchantmentKind::UNBREAKING, ExtensionRule::new(4, 10))
            .with(EnchantmentKind::EFFICIENCY, ExtensionRule::new(6, 10))
            .with(EnchantmentKind::FEATHER_FALLING, ExtensionRule::new(5, 10))
    }

    /// The rule for a kind, if the kind is extendable
    pub fn rule(&self, kind: &EnchantmentKind) -> Option<ExtensionRule> {
        self.rules.get(kind).copied()
    }

    /// Iterate (kind, rule) pairs; order is unspecified
    pub fn iter(&self) -> impl Iterator<Item = (&EnchantmentKind, ExtensionRule)> {
        self.rules.iter().map(|(k, r)| (k, *r))
    }

    /// Number of configured kinds
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no kinds are configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Immutable result-level -> experience-point cost mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTable {
    costs: HashMap<u32, u32>,
}

impl CostTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style cost insert
    pub fn with(mut self, level: u32, cost: u32) -> Self {
        self.costs.insert(level, cost);
        self
    }

    /// The built-in cost ladder for levels 4 through 10
    pub fn vanilla() -> Self {
        Self::new()
            .with(4, 5)
            .with(5, 10)
            .with(6, 15)
            .with(7, 20)
            .with(8, 30)
            .with(9, 40)
            .with(10, 50)
    }

    /// The XP cost for producing `level`, if configured
    pub fn cost(&self, level: u32) -> Option<u32> {
        self.costs.get(&level).copied()
    }

    /// Iterate (level, cost) pairs; order is unspecified
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.costs.iter().map(|(level, cost)| (*level, *cost))
    }

    /// Number of configured levels
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Whether no levels are configured
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Table validation errors, fatal at engine construction
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("rule for '{kind}' charges level {level} but the cost table has no entry for it")]
    MissingCost { kind: EnchantmentKind, level: u32 },

    #[error("rule for '{kind}' has first_extended {first_extended} above ceiling {ceiling}")]
    EmptyWindow {
        kind: EnchantmentKind,
        first_extended: u32,
        ceiling: u32,
    },

    #[error("rule for '{kind}' has first_extended {first_extended}; extended levels start at 2")]
    FirstExtendedTooLow {
        kind: EnchantmentKind,
        first_extended: u32,
    },
}

/// Validate a rule table against a cost table
///
/// Every level a rule can charge (`first_extended..=ceiling`: the `level+1`
/// window maps onto exactly that range, and the probe path charges it
/// directly) must have a cost entry, and each window must be well-formed.
pub fn validate_tables(rules: &RuleTable, costs: &CostTable) -> Result<(), ConfigError> {
    for (kind, rule) in rules.iter() {
        if rule.first_extended < 2 {
            return Err(ConfigError::FirstExtendedTooLow {
                kind: kind.clone(),
                first_extended: rule.first_extended,
            });
        }
        if rule.first_extended > rule.ceiling {
            return Err(ConfigError::EmptyWindow {
                kind: kind.clone(),
                first_extended: rule.first_extended,
                ceiling: rule.ceiling,
            });
        }
        for level in rule.first_extended..=rule.ceiling {
            if costs.cost(level).is_none() {
                return Err(ConfigError::MissingCost {
                    kind: kind.clone(),
                    level,
                });
            }
        }
    }
    Ok(())
}
