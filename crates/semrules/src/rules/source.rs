//! Boundary to the external rule miner.
//!
//! Mining itself happens outside this crate; what arrives here is a rule set
//! with confidence, support and the dataset header. [`RuleExport`] reads the
//! JSON a miner run leaves behind and applies the requested thresholds.

use super::model::{MinedRules, MiningParams};
use crate::error::{Result, SemrulesError};
use std::fs;
use std::path::{Path, PathBuf};

pub trait RuleMiner {
    /// Human-readable name of the dataset the rules are mined from.
    fn name(&self) -> &str;

    fn mine(&self, params: &MiningParams) -> Result<MinedRules>;
}

/// Rules exported by a miner run as a JSON document.
#[derive(Debug, Clone)]
pub struct RuleExport {
    name: String,
    path: PathBuf,
}

impl RuleExport {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("rules")
            .to_string();
        Self { name, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All `*.json` exports in `dir`, sorted by name.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Vec<RuleExport>> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            SemrulesError::Config(format!(
                "Failed to read rules directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut exports = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_json = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            if path.is_file() && is_json {
                exports.push(RuleExport::new(path));
            }
        }

        exports.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(exports)
    }

    /// Parse and validate the whole export, without applying thresholds.
    pub fn load(&self) -> Result<MinedRules> {
        let content = fs::read_to_string(&self.path)?;
        let mut mined: MinedRules = serde_json::from_str(&content)?;
        if mined.dataset.is_empty() {
            mined.dataset = self.name.clone();
        }
        mined.validate()?;
        Ok(mined)
    }
}

impl RuleMiner for RuleExport {
    fn name(&self) -> &str {
        &self.name
    }

    fn mine(&self, params: &MiningParams) -> Result<MinedRules> {
        let mut mined = self.load()?;
        let total = mined.rules.len();
        mined.rules.retain(|rule| params.admits(rule));

        log::info!(
            "{}: kept {} of {} rules (support >= {}, confidence >= {}, length <= {})",
            mined.dataset,
            mined.rules.len(),
            total,
            params.support,
            params.confidence,
            params.max_rule_length
        );
        Ok(mined)
    }
}
