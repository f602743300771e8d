//! Word-vector store loaded from word2vec-compatible files.
//!
//! Two layouts are understood:
//! - binary: an ASCII header `"<count> <dim>\n"`, then per entry the UTF-8
//!   word terminated by a single space, `dim` little-endian `f32` values and
//!   an optional newline
//! - text: the same header, then one `word v1 .. vdim` line per entry
//!
//! Vectors are normalised to unit length on load so similarity is a plain
//! dot product.

use super::language::Language;
use super::similarity::{dot_product, normalize_vector};
use crate::error::{Result, SemrulesError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Read-only view of a vector space over tokens.
pub trait WordVectors {
    fn contains(&self, token: &str) -> bool;

    /// Cosine similarity of two tokens, `None` if either is out of vocabulary.
    fn similarity(&self, a: &str, b: &str) -> Option<f64>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn dimension(&self) -> usize;
}

/// On-disk layout of an embedding file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingFormat {
    Binary,
    Text,
}

impl EmbeddingFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            EmbeddingFormat::Binary => "model.bin",
            EmbeddingFormat::Text => "model.txt",
        }
    }
}

impl Default for EmbeddingFormat {
    fn default() -> Self {
        EmbeddingFormat::Binary
    }
}

/// Upper bound on what is reserved up front; larger files grow as they load.
const MAX_PREALLOC_ENTRIES: usize = 1 << 18;
const MAX_PREALLOC_VALUES: usize = 1 << 22;
const MAX_DIMENSION: usize = 1 << 16;

#[derive(Debug, Clone)]
pub struct EmbeddingModel {
    vocab: HashMap<String, usize>,
    vectors: Vec<f32>,
    dimension: usize,
}

impl EmbeddingModel {
    fn with_capacity(dimension: usize, count: usize) -> Self {
        Self {
            vocab: HashMap::with_capacity(count.min(MAX_PREALLOC_ENTRIES)),
            vectors: Vec::with_capacity(count.saturating_mul(dimension).min(MAX_PREALLOC_VALUES)),
            dimension,
        }
    }

    /// Build a model from in-memory vectors.
    pub fn from_entries<I, S>(dimension: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        if dimension == 0 || dimension > MAX_DIMENSION {
            return Err(SemrulesError::InvalidParameter(format!(
                "Embedding dimension must be in 1..={}, got {}",
                MAX_DIMENSION, dimension
            )));
        }

        let mut model = Self::with_capacity(dimension, 0);
        for (word, vector) in entries {
            let word = word.into();
            if vector.len() != dimension {
                return Err(SemrulesError::InvalidParameter(format!(
                    "Dimension mismatch for '{}': expected {}, got {}",
                    word,
                    dimension,
                    vector.len()
                )));
            }
            if !is_finite(&vector) {
                return Err(SemrulesError::InvalidParameter(format!(
                    "Vector for '{}' contains a non-finite value",
                    word
                )));
            }
            model.push(word, vector);
        }
        Ok(model)
    }

    /// Path of the model for `language` below an embeddings directory.
    pub fn path_for_language(dir: &Path, language: Language, format: EmbeddingFormat) -> PathBuf {
        dir.join(language.as_str()).join(format.file_name())
    }

    pub fn load_for_language(dir: &Path, language: Language, format: EmbeddingFormat) -> Result<Self> {
        Self::load(Self::path_for_language(dir, language, format), format)
    }

    /// Load a whole embedding file into memory.
    pub fn load<P: AsRef<Path>>(path: P, format: EmbeddingFormat) -> Result<Self> {
        let path = path.as_ref();
        let load_error = |reason: String| SemrulesError::ModelLoad {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        let mut reader = BufReader::new(file);

        log::info!("Loading {:?} word embedding from {}", format, path.display());

        let model = match format {
            EmbeddingFormat::Binary => Self::read_binary(&mut reader),
            EmbeddingFormat::Text => Self::read_text(&mut reader),
        }
        .map_err(load_error)?;

        log::info!(
            "Loaded {} vectors of dimension {}",
            model.len(),
            model.dimension
        );
        Ok(model)
    }

    /// Parse the binary word2vec layout.
    pub fn read_binary<R: BufRead>(reader: &mut R) -> std::result::Result<Self, String> {
        let (count, dimension) = read_header(reader)?;
        let mut model = Self::with_capacity(dimension, count);
        let mut word_buf = Vec::new();
        let byte_len = dimension
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or_else(|| format!("Vector dimension {} is too large", dimension))?;
        let mut vec_buf = vec![0u8; byte_len];

        for idx in 0..count {
            word_buf.clear();
            let read = reader
                .read_until(b' ', &mut word_buf)
                .map_err(|e| format!("Failed to read entry {}: {}", idx, e))?;
            if read == 0 || word_buf.last() != Some(&b' ') {
                return Err(format!(
                    "Truncated file: expected {} entries, found {}",
                    count, idx
                ));
            }
            word_buf.pop();

            let start = word_buf.iter().take_while(|&&b| b == b'\n' || b == b'\r').count();
            let word = std::str::from_utf8(&word_buf[start..])
                .map_err(|e| format!("Entry {} is not valid UTF-8: {}", idx, e))?
                .to_string();
            if word.is_empty() {
                return Err(format!("Entry {} has an empty word", idx));
            }

            reader
                .read_exact(&mut vec_buf)
                .map_err(|_| format!("Truncated vector for '{}' (entry {})", word, idx))?;

            let vector: Vec<f32> = vec_buf
                .chunks_exact(4)
                .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
                .collect();
            if !is_finite(&vector) {
                return Err(format!("Non-finite value in vector for '{}' (entry {})", word, idx));
            }
            model.push(word, vector);
        }

        Ok(model)
    }

    /// Parse the text word2vec / fastText layout.
    pub fn read_text<R: BufRead>(reader: &mut R) -> std::result::Result<Self, String> {
        let (count, dimension) = read_header(reader)?;
        let mut model = Self::with_capacity(dimension, count);
        let mut seen = 0;

        for (line_no, line) in reader.lines().enumerate() {
            if seen == count {
                break;
            }
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_no + 2, e))?;
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };

            let vector = parts
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| format!("Invalid value on line {}: {}", line_no + 2, e))?;
            if vector.len() != dimension {
                return Err(format!(
                    "Line {} has {} values, expected {}",
                    line_no + 2,
                    vector.len(),
                    dimension
                ));
            }
            if !is_finite(&vector) {
                return Err(format!("Non-finite value on line {}", line_no + 2));
            }

            model.push(word.to_string(), vector);
            seen += 1;
        }

        if seen < count {
            return Err(format!(
                "Truncated file: expected {} entries, found {}",
                count, seen
            ));
        }
        Ok(model)
    }

    fn push(&mut self, word: String, mut vector: Vec<f32>) {
        if self.vocab.contains_key(&word) {
            log::warn!("Duplicate vocabulary entry '{}' skipped", word);
            return;
        }
        normalize_vector(&mut vector);
        self.vocab.insert(word, self.vocab.len());
        self.vectors.extend_from_slice(&vector);
    }

    /// Unit-length vector of a token.
    pub fn vector(&self, token: &str) -> Option<&[f32]> {
        let idx = *self.vocab.get(token)?;
        let start = idx * self.dimension;
        Some(&self.vectors[start..start + self.dimension])
    }
}

impl WordVectors for EmbeddingModel {
    fn contains(&self, token: &str) -> bool {
        self.vocab.contains_key(token)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        let va = self.vector(a)?;
        let vb = self.vector(b)?;
        Some((dot_product(va, vb) as f64).clamp(-1.0, 1.0))
    }

    fn len(&self) -> usize {
        self.vocab.len()
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

fn read_header<R: BufRead>(reader: &mut R) -> std::result::Result<(usize, usize), String> {
    let mut header = String::new();
    reader
        .read_line(&mut header)
        .map_err(|e| format!("Failed to read header: {}", e))?;

    let mut fields = header.split_whitespace().map(|f| f.parse::<usize>());
    match (fields.next(), fields.next()) {
        (Some(Ok(_)), Some(Ok(dimension))) if dimension > MAX_DIMENSION => Err(format!(
            "Header dimension {} exceeds the supported maximum of {}",
            dimension, MAX_DIMENSION
        )),
        (Some(Ok(count)), Some(Ok(dimension))) if dimension > 0 => Ok((count, dimension)),
        _ => Err(format!("Malformed header line: '{}'", header.trim_end())),
    }
}

fn is_finite(vector: &[f32]) -> bool {
    vector.iter().all(|v| v.is_finite())
}
