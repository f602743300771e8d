use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemrulesError {
    #[error("'{word}' is not in the embedding vocabulary")]
    Vocabulary { word: String },

    #[error(
        "Pair ('{first}', '{second}') not found in the precomputed coherence cache. \
         Run attribute precomputing for this header first"
    )]
    CacheMiss { first: String, second: String },

    #[error("Cannot determine semantic coherence of an empty rule")]
    EmptyRule,

    #[error("Attribute name contains no words")]
    BlankAttribute,

    #[error("Could not load word embedding at {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("User input error: {0}")]
    UserInput(String),
}

impl SemrulesError {
    /// Errors confined to the coherence computation of a single rule.
    ///
    /// The ranking pipeline records these on the offending rule and carries on
    /// with the rest of the batch.
    pub fn is_rule_local(&self) -> bool {
        matches!(
            self,
            SemrulesError::Vocabulary { .. }
                | SemrulesError::CacheMiss { .. }
                | SemrulesError::EmptyRule
                | SemrulesError::BlankAttribute
        )
    }
}

impl From<dialoguer::Error> for SemrulesError {
    fn from(err: dialoguer::Error) -> Self {
        SemrulesError::UserInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SemrulesError>;
