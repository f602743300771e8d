use crate::error::{Result, SemrulesError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Universal POS tags appended to words in the tagged English vectors.
const ENGLISH_MARKERS: &[&str] = &[
    "_NOUN", "_VERB", "_ADJ", "_ADV", "_NUM", "_PROPN", "_X", "_SYM", "_INTJ",
];

/// The Czech vectors are untagged, so the bare word is the only form.
const CZECH_MARKERS: &[&str] = &[""];

/// Language of a pretrained embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[serde(alias = "cs")]
    Cz,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Cz => "cz",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "cz" | "cs" => Ok(Language::Cz),
            other => Err(SemrulesError::InvalidParameter(format!(
                "'{}' is not an acceptable language code (valid: en, cz)",
                other
            ))),
        }
    }

    /// Suffixes probed when looking a word up in the vocabulary.
    pub fn sense_markers(&self) -> &'static [&'static str] {
        match self {
            Language::En => ENGLISH_MARKERS,
            Language::Cz => CZECH_MARKERS,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
