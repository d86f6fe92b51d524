//! Configuration and source factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lexdrill_core::languages::known_codes;
use lexdrill_core::loader::LoadOptions;
use lexdrill_core::model::InteractionMode;
use lexdrill_core::traits::DataSource;

use crate::directory::DirectorySource;
use crate::http::HttpSource;
use crate::mock::MockSource;

/// Where vocabulary documents are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Directory {
        #[serde(default = "default_data_dir")]
        path: PathBuf,
    },
    Http {
        base_url: String,
    },
    /// The built-in vocabulary, no retrieval.
    Embedded,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Directory {
            path: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Top-level lexdrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexdrillConfig {
    /// Time allowed for the concept list.
    #[serde(default = "default_concept_timeout")]
    pub concept_timeout_ms: u64,
    /// Time allowed for each word list.
    #[serde(default = "default_language_timeout")]
    pub language_timeout_ms: u64,
    /// How long "Counted as correct!" stays before the next word.
    #[serde(default = "default_answer_display")]
    pub answer_display_ms: u64,
    #[serde(default)]
    pub default_mode: InteractionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_language: Option<String>,
    /// Language codes to probe. Defaults to every known code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    /// Substitute the built-in vocabulary when nothing usable was retrieved.
    #[serde(default = "default_true")]
    pub embedded_fallback: bool,
    #[serde(default)]
    pub source: SourceConfig,
}

fn default_concept_timeout() -> u64 {
    3000
}
fn default_language_timeout() -> u64 {
    2000
}
fn default_answer_display() -> u64 {
    1500
}
fn default_true() -> bool {
    true
}

impl Default for LexdrillConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            concept_timeout_ms: default_concept_timeout(),
            language_timeout_ms: default_language_timeout(),
            answer_display_ms: default_answer_display(),
            default_mode: InteractionMode::default(),
            target_language: None,
            reference_language: None,
            languages: None,
            embedded_fallback: true,
        }
    }
}

impl LexdrillConfig {
    /// Retrieval options for the dataset loader.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            concept_timeout: Duration::from_millis(self.concept_timeout_ms),
            language_timeout: Duration::from_millis(self.language_timeout_ms),
            languages: self.languages.clone().unwrap_or_else(known_codes),
            embedded_fallback: self.embedded_fallback,
        }
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.answer_display_ms)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Directory { path } => SourceConfig::Directory {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
        SourceConfig::Http { base_url } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
        },
        SourceConfig::Embedded => SourceConfig::Embedded,
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lexdrill.toml` in the current directory
/// 2. `~/.config/lexdrill/config.toml`
///
/// Environment variable overrides: `LEXDRILL_SOURCE_URL`, `LEXDRILL_DATA_DIR`.
pub fn load_config() -> Result<LexdrillConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LexdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("reading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexdrillConfig::default(),
    };

    if let Ok(url) = std::env::var("LEXDRILL_SOURCE_URL") {
        config.source = SourceConfig::Http { base_url: url };
    } else if let Ok(dir) = std::env::var("LEXDRILL_DATA_DIR") {
        config.source = SourceConfig::Directory {
            path: PathBuf::from(dir),
        };
    }

    config.source = resolve_source_config(&config.source);
    Ok(config)
}

/// Parse a config document.
pub fn parse_config(content: &str) -> Result<LexdrillConfig> {
    Ok(toml::from_str::<LexdrillConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexdrill"))
}

/// Create a data source from its configuration.
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn DataSource>> {
    match config {
        SourceConfig::Directory { path } => Ok(Arc::new(DirectorySource::new(path))),
        SourceConfig::Http { base_url } => {
            let source = HttpSource::new(base_url)
                .with_context(|| format!("cannot use source {base_url}"))?;
            Ok(Arc::new(source))
        }
        SourceConfig::Embedded => Ok(Arc::new(MockSource::embedded())),
    }
}
