//! Pretrained word-vector spaces.

pub mod language;
pub mod model;
pub mod similarity;

pub use language::Language;
pub use model::{EmbeddingFormat, EmbeddingModel, WordVectors};
pub use similarity::dot_product;
