//! Rule table snapshot (rule_table.json)
//!
//! Captures the effective extension and cost tables at a point in time so a
//! server operator can audit which rules were live when a merge was allowed.
//! The SHA-256 hash of the canonical JSON identifies a table revision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;

use super::{CostTable, RuleTable};

/// Schema version for rule_table.json
pub const SCHEMA_VERSION: u32 = 1;

/// Schema identifier
pub const SCHEMA_ID: &str = "anvil-extend/rule_table@1";

/// One rule entry in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleEntry {
    /// Enchantment kind identifier
    pub kind: String,

    /// First beyond-vanilla level
    pub first_extended: u32,

    /// Highest level the rule allows
    pub ceiling: u32,
}

/// One cost entry in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEntry {
    /// Result level being charged
    pub level: u32,

    /// Experience-point cost
    pub cost: u32,
}

/// Snapshot of the effective extension tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Schema version
    pub schema_version: u32,

    /// Schema identifier
    pub schema_id: String,

    /// When this snapshot was created
    pub created_at: DateTime<Utc>,

    /// Extension rules, sorted by kind
    pub rules: Vec<RuleEntry>,

    /// Cost ladder, sorted by level
    pub costs: Vec<CostEntry>,
}

impl TableSnapshot {
    /// Snapshot the given tables
    ///
    /// Entries are sorted (rules by kind, costs by level) so that equal
    /// tables always produce the same canonical JSON and digest.
    pub fn new(rules: &RuleTable, costs: &CostTable) -> Self {
        let mut rule_entries: Vec<RuleEntry> = rules
            .iter()
            .map(|(kind, rule)| RuleEntry {
                kind: kind.as_str().to_string(),
                first_extended: rule.first_extended,
                ceiling: rule.ceiling,
            })
            .collect();
        rule_entries.sort_by(|a, b| a.kind.cmp(&b.kind));

        let mut cost_entries: Vec<CostEntry> = costs
            .iter()
            .map(|(level, cost)| CostEntry { level, cost })
            .collect();
        cost_entries.sort_by_key(|entry| entry.level);

        Self {
            schema_version: SCHEMA_VERSION,
            schema_id: SCHEMA_ID.to_string(),
            created_at: Utc::now(),
            rules: rule_entries,
            costs: cost_entries,
        }
    }

    /// Serialize to canonical JSON (compact form)
    ///
    /// Used for computing the digest; `created_at` is excluded from the
    /// digest input so that re-snapshotting identical tables matches.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Digestible<'a> {
            schema_version: u32,
            schema_id: &'a str,
            rules: &'a [RuleEntry],
            costs: &'a [CostEntry],
        }

        serde_json::to_string(&Digestible {
            schema_version: self.schema_version,
            schema_id: &self.schema_id,
            rules: &self.rules,
            costs: &self.costs,
        })
    }

    /// Serialize to pretty JSON for human reading
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Compute the SHA-256 digest of the canonical JSON
    pub fn sha256(&self) -> Result<String, serde_json::Error> {
        let canonical = self.to_canonical_json()?;
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }

    /// Write to a file
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("JSON serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)
    }

    /// Write to a directory as rule_table.json
    pub fn write_to_dir(&self, dir: &Path) -> io::Result<()> {
        self.write_to_file(&dir.join("rule_table.json"))
    }
}
