pub mod model;
pub mod ranking;
pub mod source;

pub use model::{validate_unit, Condition, MinedRules, MiningParams, Rule};
pub use ranking::{blended_score, FilterOutcome, RankedRule, RankedRuleSet, RankingSummary};
pub use source::{RuleExport, RuleMiner};
