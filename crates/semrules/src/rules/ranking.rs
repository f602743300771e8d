//! Ranking and filtering of mined rules by semantic coherence and confidence.

use super::model::{validate_unit, MinedRules, Rule};
use crate::coherence::CoherenceContext;
use crate::embedding::WordVectors;
use crate::error::Result;
use indicatif::ProgressBar;
use serde::Serialize;
use std::cmp::Ordering;

/// `alpha`-weighted convex combination of coherence and confidence.
pub fn blended_score(alpha: f64, coherence: f64, confidence: f64) -> f64 {
    alpha * coherence + (1.0 - alpha) * confidence
}

/// A mined rule with the coherence of its antecedent attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRule {
    pub rule: Rule,
    pub coherence: Option<f64>,
    /// Why the coherence could not be computed.
    pub failure: Option<String>,
}

impl RankedRule {
    /// Blended score, `None` when the rule has no coherence and `alpha`
    /// gives coherence any weight.
    pub fn score(&self, alpha: f64) -> Option<f64> {
        match self.coherence {
            Some(coherence) => Some(blended_score(alpha, coherence, self.rule.confidence)),
            None if alpha == 0.0 => Some(self.rule.confidence),
            None => None,
        }
    }
}

/// Result of filtering by consequent value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Matched(RankedRuleSet),
    NoMatch,
}

impl FilterOutcome {
    pub fn into_option(self) -> Option<RankedRuleSet> {
        match self {
            FilterOutcome::Matched(set) => Some(set),
            FilterOutcome::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingSummary {
    pub scored: usize,
    pub failed: usize,
    pub mean_coherence: Option<f64>,
}

/// Ordered rules with coherence. Every operation returns a new set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedRuleSet {
    rules: Vec<RankedRule>,
}

impl RankedRuleSet {
    pub fn new(rules: Vec<RankedRule>) -> Self {
        Self { rules }
    }

    /// Precompute the mined header in `ctx`, then attach coherence to every rule.
    pub fn from_mined<V: WordVectors + ?Sized>(
        ctx: &mut CoherenceContext<'_, V>,
        mined: &MinedRules,
        progress: Option<&ProgressBar>,
    ) -> Result<Self> {
        ctx.precompute_with_progress(&mined.header, progress)?;
        Self::score_rules(ctx, &mined.rules)
    }

    /// Attach coherence using the cache already held by `ctx`.
    ///
    /// Coherence failures stay with the rule they belong to; only errors
    /// unrelated to a single rule abort the batch.
    pub fn score_rules<V: WordVectors + ?Sized>(
        ctx: &CoherenceContext<'_, V>,
        rules: &[Rule],
    ) -> Result<Self> {
        let mut ranked = Vec::with_capacity(rules.len());

        for rule in rules {
            let entry = match ctx.rule_coherence(&rule.attributes()) {
                Ok(coherence) => RankedRule {
                    rule: rule.clone(),
                    coherence: Some(coherence),
                    failure: None,
                },
                Err(e) if e.is_rule_local() => {
                    log::warn!("No coherence for rule {}: {}", rule, e);
                    RankedRule {
                        rule: rule.clone(),
                        coherence: None,
                        failure: Some(e.to_string()),
                    }
                }
                Err(e) => return Err(e),
            };
            ranked.push(entry);
        }

        Ok(Self { rules: ranked })
    }

    /// Sort by blended score, highest first.
    ///
    /// Equal scores keep their current relative order. Rules without a score
    /// go last.
    pub fn reorder(&self, alpha: f64) -> Result<Self> {
        let alpha = validate_unit("alpha", alpha)?;
        let mut rules = self.rules.clone();

        rules.sort_by(|a, b| match (a.score(alpha), b.score(alpha)) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(Self { rules })
    }

    /// Rules whose consequent value equals `target`, ignoring case and
    /// surrounding whitespace.
    pub fn filter_consequent(&self, target: &str) -> FilterOutcome {
        let target = target.trim().to_lowercase();
        let rules: Vec<RankedRule> = self
            .rules
            .iter()
            .filter(|r| r.rule.consequent.value.trim().to_lowercase() == target)
            .cloned()
            .collect();

        if rules.is_empty() {
            FilterOutcome::NoMatch
        } else {
            FilterOutcome::Matched(Self { rules })
        }
    }

    pub fn summary(&self) -> RankingSummary {
        let scores: Vec<f64> = self.rules.iter().filter_map(|r| r.coherence).collect();
        let mean_coherence = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        RankingSummary {
            scored: scores.len(),
            failed: self.rules.len() - scores.len(),
            mean_coherence,
        }
    }

    pub fn rules(&self) -> &[RankedRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedRuleSet {
    type Item = &'a RankedRule;
    type IntoIter = std::slice::Iter<'a, RankedRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
