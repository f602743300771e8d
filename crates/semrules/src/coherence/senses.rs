//! Sense-variant lookup and word/attribute similarity.
//!
//! A bare word is probed in the vocabulary under every sense marker of the
//! loaded language. Two words are as similar as their best matching pair of
//! senses, and two attributes are as coherent as the mean similarity of
//! their word pairs.

use crate::embedding::{Language, WordVectors};
use crate::error::{Result, SemrulesError};

pub struct SenseResolver<'m, V: WordVectors + ?Sized> {
    model: &'m V,
    markers: &'static [&'static str],
}

impl<'m, V: WordVectors + ?Sized> SenseResolver<'m, V> {
    pub fn new(model: &'m V, language: Language) -> Self {
        Self {
            model,
            markers: language.sense_markers(),
        }
    }

    /// Surface forms of `word` present in the vocabulary, in marker order.
    pub fn variants(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        self.markers
            .iter()
            .map(|marker| format!("{}{}", word, marker))
            .filter(|token| self.model.contains(token))
            .collect()
    }

    /// Maximum similarity over every combination of the two words' senses.
    pub fn word_similarity(&self, word1: &str, word2: &str) -> Result<f64> {
        let senses1 = self.variants(word1);
        if senses1.is_empty() {
            return Err(SemrulesError::Vocabulary {
                word: word1.to_lowercase(),
            });
        }
        let senses2 = self.variants(word2);
        if senses2.is_empty() {
            return Err(SemrulesError::Vocabulary {
                word: word2.to_lowercase(),
            });
        }

        let mut best = f64::NEG_INFINITY;
        for a in &senses1 {
            for b in &senses2 {
                let sim = self
                    .model
                    .similarity(a, b)
                    .ok_or_else(|| SemrulesError::Vocabulary { word: a.clone() })?;
                best = best.max(sim);
            }
        }

        log::trace!("similarity({}, {}) = {:.4}", word1, word2, best);
        Ok(best)
    }

    /// Mean word similarity over the cross product of two attribute names.
    pub fn attribute_coherence(&self, attr1: &str, attr2: &str) -> Result<f64> {
        let words1: Vec<&str> = attr1.split_whitespace().collect();
        let words2: Vec<&str> = attr2.split_whitespace().collect();
        if words1.is_empty() || words2.is_empty() {
            return Err(SemrulesError::BlankAttribute);
        }

        let mut total = 0.0;
        for w1 in &words1 {
            for w2 in &words2 {
                total += self.word_similarity(w1, w2)?;
            }
        }

        Ok(total / (words1.len() * words2.len()) as f64)
    }

    /// Mean word similarity over the distinct word pairs inside one attribute.
    ///
    /// A single-word attribute has nothing to disagree with and scores 1.0.
    pub fn self_coherence(&self, attr: &str) -> Result<f64> {
        let words: Vec<&str> = attr.split_whitespace().collect();
        match words.len() {
            0 => Err(SemrulesError::BlankAttribute),
            1 => Ok(1.0),
            n => {
                let mut total = 0.0;
                for i in 0..n {
                    for j in (i + 1)..n {
                        total += self.word_similarity(words[i], words[j])?;
                    }
                }
                Ok(total / (n * (n - 1) / 2) as f64)
            }
        }
    }
}
