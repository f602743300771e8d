pub mod coherence;
pub mod config;
pub mod embedding;
pub mod error;
pub mod rules;
pub mod util;

pub use coherence::{
    AttributePair, CoherenceCache, CoherenceContext, PairCoherence, PrecomputeSummary,
    SenseResolver,
};
pub use config::{Config, ConfigFile, ConfigOverrides};
pub use embedding::{EmbeddingFormat, EmbeddingModel, Language, WordVectors};
pub use error::{Result, SemrulesError};
pub use rules::{
    blended_score, Condition, FilterOutcome, MinedRules, MiningParams, RankedRule,
    RankedRuleSet, RankingSummary, Rule, RuleExport, RuleMiner,
};
