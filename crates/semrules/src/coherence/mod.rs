pub mod cache;
pub mod context;
pub mod senses;

pub use cache::{AttributePair, CoherenceCache, PairCoherence};
pub use context::{CoherenceContext, PrecomputeSummary};
pub use senses::SenseResolver;
