pub mod browse;
pub mod coherence;
pub mod rank;
mod render;

use clap::{Parser, Subcommand};
use console::style;
use semrules_lib::{Config, ConfigOverrides, EmbeddingFormat, EmbeddingModel, Language, Result};
use semrules_lib::WordVectors;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "semrules")]
#[command(about = "Rank mined classification rules by semantic coherence", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding <lang>/model.bin embeddings")]
    pub embeddings: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding mined rule exports (*.json)")]
    pub rules_dir: Option<PathBuf>,

    #[arg(long, global = true, value_parser = parse_language, help = "Vocabulary language (en, cz)")]
    pub lang: Option<Language>,

    #[arg(long, global = true, help = "Embedding file uses the text layout (model.txt)")]
    pub text_format: bool,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Interactively mine, filter and reorder rule sets (default)")]
    Browse,

    #[command(about = "Rank a rule export without prompting")]
    Rank {
        #[arg(help = "Path to the rule export (JSON)")]
        export: PathBuf,

        #[arg(long, default_value_t = 0.0, help = "Minimum rule support [0.0, 1.0]")]
        support: f64,

        #[arg(long, default_value_t = 0.0, help = "Minimum rule confidence [0.0, 1.0]")]
        confidence: f64,

        #[arg(long, default_value_t = 10, help = "Maximum rule length, consequent included")]
        max_length: usize,

        #[arg(long, help = "Reorder by alpha * coherence + (1 - alpha) * confidence")]
        alpha: Option<f64>,

        #[arg(long, help = "Keep only rules with this consequent value")]
        filter: Option<String>,

        #[arg(long, default_value = "table", help = "Output format (table, plain, json)")]
        format: String,
    },

    #[command(about = "Semantic coherence of a set of attribute names")]
    Coherence {
        #[arg(required = true, help = "Attribute names (separate arguments or comma-separated)")]
        attributes: Vec<String>,
    },

    #[command(about = "Best-sense similarity of two words")]
    Similarity {
        word1: String,
        word2: String,
    },
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            embeddings_dir: self.embeddings.clone(),
            rules_dir: self.rules_dir.clone(),
            language: self.lang,
            embedding_format: self.text_format.then_some(EmbeddingFormat::Text),
        }
    }
}

fn parse_language(s: &str) -> std::result::Result<Language, String> {
    Language::from_str(s).map_err(|e| e.to_string())
}

pub fn load_model(config: &Config) -> Result<EmbeddingModel> {
    println!("{} Loading word embeddings...", style(">>>").cyan());
    let model = EmbeddingModel::load(config.model_path(), config.embedding_format)?;
    println!(
        "{} Loaded {} vectors ({} dimensions)",
        style("✓").green(),
        model.len(),
        model.dimension()
    );
    Ok(model)
}
