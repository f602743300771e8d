use crate::embedding::{EmbeddingFormat, Language};
use crate::error::{Result, SemrulesError};
use crate::rules::validate_unit;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

const DEFAULT_ALPHA: f64 = 0.5;

/// Contents of `semrules.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub embeddings_dir: Option<PathBuf>,
    pub rules_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub embedding_format: Option<EmbeddingFormat>,
    pub default_alpha: Option<f64>,
}

impl ConfigFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SemrulesError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str)
            .map_err(|e| SemrulesError::Config(format!("Failed to parse TOML: {}", e)))
    }
}

/// Values supplied on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub embeddings_dir: Option<PathBuf>,
    pub rules_dir: Option<PathBuf>,
    pub language: Option<Language>,
    pub embedding_format: Option<EmbeddingFormat>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub embeddings_dir: PathBuf,
    pub rules_dir: PathBuf,
    pub language: Language,
    pub embedding_format: EmbeddingFormat,
    pub default_alpha: f64,
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration: overrides, then `SEMRULES_EMBEDDINGS` /
    /// `SEMRULES_RULES`, then the TOML file, then XDG data directories.
    pub fn new(overrides: ConfigOverrides) -> Result<Self> {
        let config_path = match overrides.config_path {
            Some(path) => Some(path),
            None => BaseDirectories::with_prefix("semrules")
                .ok()
                .and_then(|xdg| xdg.find_config_file("semrules.toml")),
        };

        let file = match &config_path {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };

        let embeddings_dir = match overrides
            .embeddings_dir
            .or_else(|| std::env::var_os("SEMRULES_EMBEDDINGS").map(PathBuf::from))
            .or(file.embeddings_dir)
        {
            Some(dir) => dir,
            None => default_data_dir("embeddings")?,
        };

        let rules_dir = match overrides
            .rules_dir
            .or_else(|| std::env::var_os("SEMRULES_RULES").map(PathBuf::from))
            .or(file.rules_dir)
        {
            Some(dir) => dir,
            None => default_data_dir("rules")?,
        };

        let default_alpha = match file.default_alpha {
            Some(alpha) => validate_unit("default_alpha", alpha)
                .map_err(|e| SemrulesError::Config(e.to_string()))?,
            None => DEFAULT_ALPHA,
        };

        Ok(Self {
            embeddings_dir,
            rules_dir,
            language: overrides.language.or(file.language).unwrap_or_default(),
            embedding_format: overrides
                .embedding_format
                .or(file.embedding_format)
                .unwrap_or_default(),
            default_alpha,
            config_path,
        })
    }

    /// Embedding file for the configured language.
    pub fn model_path(&self) -> PathBuf {
        crate::embedding::EmbeddingModel::path_for_language(
            &self.embeddings_dir,
            self.language,
            self.embedding_format,
        )
    }
}

fn default_data_dir(name: &str) -> Result<PathBuf> {
    let xdg = BaseDirectories::with_prefix("semrules").map_err(|e| {
        SemrulesError::Config(format!("Failed to initialize XDG directories: {}", e))
    })?;
    Ok(xdg.get_data_home().join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("semrules.toml");
        std::fs::write(
            &config_path,
            r#"
                embeddings_dir = "/from/file"
                rules_dir = "/rules/from/file"
                language = "cz"
                default_alpha = 0.25
            "#,
        )
        .unwrap();

        let config = Config::new(ConfigOverrides {
            config_path: Some(config_path.clone()),
            embeddings_dir: Some(PathBuf::from("/from/cli")),
            rules_dir: Some(PathBuf::from("/rules/from/cli")),
            language: Some(Language::En),
            embedding_format: Some(EmbeddingFormat::Text),
        })
        .unwrap();

        assert_eq!(config.embeddings_dir, PathBuf::from("/from/cli"));
        assert_eq!(config.rules_dir, PathBuf::from("/rules/from/cli"));
        assert_eq!(config.language, Language::En);
        assert_eq!(config.default_alpha, 0.25);
        assert_eq!(config.config_path, Some(config_path));
        assert_eq!(config.model_path(), PathBuf::from("/from/cli/en/model.txt"));
    }

    #[test]
    fn test_file_values_used() {
        let file = ConfigFile::from_toml(
            r#"
                language = "cz"
                embedding_format = "text"
            "#,
        )
        .unwrap();
        assert_eq!(file.language, Some(Language::Cz));
        assert_eq!(file.embedding_format, Some(EmbeddingFormat::Text));
        assert!(file.embeddings_dir.is_none());
    }

    #[test]
    fn test_invalid_file_rejected() {
        assert!(ConfigFile::from_toml("language = \"de\"").is_err());
        assert!(ConfigFile::from_toml("colour = \"blue\"").is_err());

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("semrules.toml");
        std::fs::write(&config_path, "default_alpha = 2.0").unwrap();
        let result = Config::new(ConfigOverrides {
            config_path: Some(config_path),
            embeddings_dir: Some(dir.path().to_path_buf()),
            rules_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        });
        assert!(matches!(result, Err(SemrulesError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::new(ConfigOverrides {
            config_path: Some(PathBuf::from("/nonexistent/semrules.toml")),
            ..Default::default()
        });
        assert!(result.is_err());
    }
}
