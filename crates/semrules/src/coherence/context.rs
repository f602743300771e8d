//! Rule-level coherence over a model and the cache of one dataset header.

use super::cache::{CoherenceCache, PairCoherence};
use super::senses::SenseResolver;
use crate::embedding::{Language, WordVectors};
use crate::error::{Result, SemrulesError};
use indicatif::ProgressBar;

/// What a precompute pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecomputeSummary {
    pub attributes: usize,
    pub pairs: usize,
    pub unresolved: usize,
}

/// Bundles a borrowed embedding with the coherence cache of the active header.
///
/// Every coherence operation goes through a context, so several headers (or
/// models) can be worked on side by side by holding several contexts.
pub struct CoherenceContext<'m, V: WordVectors + ?Sized> {
    resolver: SenseResolver<'m, V>,
    cache: CoherenceCache,
}

impl<'m, V: WordVectors + ?Sized> CoherenceContext<'m, V> {
    pub fn new(model: &'m V, language: Language) -> Self {
        Self {
            resolver: SenseResolver::new(model, language),
            cache: CoherenceCache::default(),
        }
    }

    pub fn resolver(&self) -> &SenseResolver<'m, V> {
        &self.resolver
    }

    pub fn cache(&self) -> &CoherenceCache {
        &self.cache
    }

    pub fn precompute<S: AsRef<str>>(&mut self, header: &[S]) -> Result<PrecomputeSummary> {
        self.precompute_with_progress(header, None)
    }

    /// Rebuild the cache for `header`, discarding the previous one entirely.
    pub fn precompute_with_progress<S: AsRef<str>>(
        &mut self,
        header: &[S],
        progress: Option<&ProgressBar>,
    ) -> Result<PrecomputeSummary> {
        self.cache = CoherenceCache::build(&self.resolver, header, progress)?;

        let summary = PrecomputeSummary {
            attributes: self.cache.header().len(),
            pairs: self.cache.len(),
            unresolved: self.cache.unresolved().count(),
        };
        log::info!(
            "Precomputed {} attribute pairs over {} attributes ({} unresolved)",
            summary.pairs,
            summary.attributes,
            summary.unresolved
        );
        Ok(summary)
    }

    /// Semantic coherence across the attributes of a rule's antecedent.
    ///
    /// - one single-word attribute: exactly 1.0
    /// - one multi-word attribute: mean similarity of its own word pairs,
    ///   computed directly
    /// - several attributes: mean of the cached pair coherences
    pub fn rule_coherence<S: AsRef<str>>(&self, antecedent: &[S]) -> Result<f64> {
        match antecedent {
            [] => Err(SemrulesError::EmptyRule),
            [single] => self.resolver.self_coherence(single.as_ref()),
            attributes => {
                let mut total = 0.0;
                let mut count = 0usize;

                for i in 0..attributes.len() {
                    for j in (i + 1)..attributes.len() {
                        total += self.cached_pair(attributes[i].as_ref(), attributes[j].as_ref())?;
                        count += 1;
                    }
                }

                Ok(total / count as f64)
            }
        }
    }

    fn cached_pair(&self, a: &str, b: &str) -> Result<f64> {
        match self.cache.get(a, b) {
            Some(PairCoherence::Scored(score)) => Ok(*score),
            Some(PairCoherence::Unresolved { word }) => Err(SemrulesError::Vocabulary {
                word: word.clone(),
            }),
            Some(PairCoherence::Blank) => Err(SemrulesError::BlankAttribute),
            None => Err(SemrulesError::CacheMiss {
                first: a.to_string(),
                second: b.to_string(),
            }),
        }
    }
}
