use crate::error::{Result, SemrulesError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `attribute = value` item of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub attribute: String,
    pub value: String,
}

impl Condition {
    pub fn new(attribute: &str, value: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.attribute, self.value)
    }
}

/// A classification association rule as produced by the miner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedent: Vec<Condition>,
    pub consequent: Condition,
    pub confidence: f64,
    pub support: f64,
}

impl Rule {
    /// Attribute names of the antecedent, in rule order.
    pub fn attributes(&self) -> Vec<&str> {
        self.antecedent.iter().map(|c| c.attribute.as_str()).collect()
    }

    /// Rule length, counting the consequent.
    pub fn length(&self) -> usize {
        self.antecedent.len() + 1
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SemrulesError::Config(format!(
                "Rule {} has confidence {} outside [0, 1]",
                self, self.confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.support) {
            return Err(SemrulesError::Config(format!(
                "Rule {} has support {} outside [0, 1]",
                self, self.support
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let antecedent: Vec<String> = self.antecedent.iter().map(|c| c.to_string()).collect();
        write!(f, "{} → {}", antecedent.join(" & "), self.consequent)
    }
}

/// Rule set plus the dataset facts the miner reports alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinedRules {
    #[serde(default)]
    pub dataset: String,
    /// Every column of the mined dataset, target included.
    pub header: Vec<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    pub rules: Vec<Rule>,
}

impl MinedRules {
    pub fn validate(&self) -> Result<()> {
        if self.header.is_empty() {
            return Err(SemrulesError::Config(format!(
                "Rule export '{}' has an empty header",
                self.dataset
            )));
        }
        if let Some(accuracy) = self.accuracy {
            if !(0.0..=1.0).contains(&accuracy) {
                return Err(SemrulesError::Config(format!(
                    "Model accuracy {} outside [0, 1]",
                    accuracy
                )));
            }
        }

        for rule in &self.rules {
            rule.validate()?;
            for attribute in rule.attributes() {
                if !self.header.iter().any(|h| h == attribute) {
                    return Err(SemrulesError::Config(format!(
                        "Rule {} uses attribute '{}' missing from the header",
                        rule, attribute
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Thresholds handed to the miner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningParams {
    pub support: f64,
    pub confidence: f64,
    pub max_rule_length: usize,
}

impl MiningParams {
    pub fn new(support: f64, confidence: f64, max_rule_length: usize) -> Result<Self> {
        validate_unit("support", support)?;
        validate_unit("confidence", confidence)?;
        if max_rule_length < 2 {
            return Err(SemrulesError::InvalidParameter(
                "The rule length must be at least 2".to_string(),
            ));
        }
        Ok(Self {
            support,
            confidence,
            max_rule_length,
        })
    }

    pub fn admits(&self, rule: &Rule) -> bool {
        rule.support >= self.support
            && rule.confidence >= self.confidence
            && rule.length() <= self.max_rule_length
    }
}

/// Check that `value` lies in the [0.0, 1.0] interval.
pub fn validate_unit(name: &str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SemrulesError::InvalidParameter(format!(
            "{} must be in the [0.0, 1.0] interval, got {}",
            name, value
        )))
    }
}
