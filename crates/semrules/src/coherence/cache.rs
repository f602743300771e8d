//! Precomputed coherence for every attribute pair of a dataset header.

use super::senses::SenseResolver;
use crate::embedding::WordVectors;
use crate::error::{Result, SemrulesError};
use indicatif::ProgressBar;
use std::collections::{HashMap, HashSet};

/// Unordered pair of attribute names.
///
/// The names are stored in lexicographic order, so `(a, b)` and `(b, a)`
/// hash and compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributePair {
    first: String,
    second: String,
}

impl AttributePair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                first: a.to_string(),
                second: b.to_string(),
            }
        } else {
            Self {
                first: b.to_string(),
                second: a.to_string(),
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Outcome of precomputing one pair.
#[derive(Debug, Clone, PartialEq)]
pub enum PairCoherence {
    Scored(f64),
    /// A word of the pair has no sense in the vocabulary.
    Unresolved { word: String },
    /// One of the attribute names has no words.
    Blank,
}

#[derive(Debug, Clone, Default)]
pub struct CoherenceCache {
    header: Vec<String>,
    pairs: HashMap<AttributePair, PairCoherence>,
}

impl CoherenceCache {
    /// Compute coherence for every `i < j` pair of distinct header attributes.
    ///
    /// Pairs failing on vocabulary are kept as [`PairCoherence::Unresolved`]
    /// so the rest of the header stays usable. Any other failure aborts the
    /// build.
    pub fn build<V, S>(
        resolver: &SenseResolver<'_, V>,
        header: &[S],
        progress: Option<&ProgressBar>,
    ) -> Result<Self>
    where
        V: WordVectors + ?Sized,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let header: Vec<String> = header
            .iter()
            .map(|a| a.as_ref().to_string())
            .filter(|a| seen.insert(a.clone()))
            .collect();

        let mut pairs = HashMap::with_capacity(Self::pair_count(header.len()));

        for i in 0..header.len() {
            for j in (i + 1)..header.len() {
                let (a, b) = (&header[i], &header[j]);
                let entry = match resolver.attribute_coherence(a, b) {
                    Ok(score) => {
                        log::debug!("coherence('{}', '{}') = {:.4}", a, b, score);
                        PairCoherence::Scored(score)
                    }
                    Err(SemrulesError::Vocabulary { word }) => {
                        log::warn!("Pair ('{}', '{}') unresolved: '{}' not in vocabulary", a, b, word);
                        PairCoherence::Unresolved { word }
                    }
                    Err(SemrulesError::BlankAttribute) => {
                        log::warn!("Pair ('{}', '{}') unresolved: blank attribute name", a, b);
                        PairCoherence::Blank
                    }
                    Err(e) => return Err(e),
                };
                pairs.insert(AttributePair::new(a, b), entry);

                if let Some(pb) = progress {
                    pb.inc(1);
                }
            }
        }

        Ok(Self { header, pairs })
    }

    /// Number of pairs a header of `n` distinct attributes produces.
    pub fn pair_count(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&PairCoherence> {
        self.pairs.get(&AttributePair::new(a, b))
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (&AttributePair, &str)> {
        self.pairs.iter().filter_map(|(pair, entry)| match entry {
            PairCoherence::Unresolved { word } => Some((pair, word.as_str())),
            PairCoherence::Scored(_) | PairCoherence::Blank => None,
        })
    }
}
