//! Layered recommender configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the config file,
//! `SKILLREC_<OPTION>` environment variables, explicit `key=value` overrides.
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.skillrec/config.toml
//! rarest_allowed_skill = 2
//! use_binary = true
//! normalize_skill_vectors = false
//! similarity_metric = "adjusted-cosine-0.5"
//! convert_back = true
//! nb_workers = 0
//!
//! [skill_features]
//! feature_type = "noun"
//! stemmer = "porter"
//! use_lowercase = true
//! remove_numbers = false
//!
//! [neighbourhood]
//! use_neighbourhood = true
//! neighbourhood_size = 10
//! ```
//!
//! The same keys may be written as YAML in a `.yaml`/`.yml` file.

use crate::env::{config_file_from_env, default_config_file, env_overrides};
use anyhow::{bail, Context, Result};
use skillrec_intelligence::RecommenderConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Syntax of a config file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml` and anything unrecognized.
    Toml,
    /// `.yaml` or `.yml`.
    Yaml,
}

impl ConfigFormat {
    /// Format implied by a file name.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Parse config text in the given format.
pub fn parse_config(text: &str, format: ConfigFormat) -> Result<RecommenderConfig> {
    let config: RecommenderConfig = match format {
        ConfigFormat::Toml => toml::from_str(text).context("invalid TOML configuration")?,
        ConfigFormat::Yaml => {
            if text.trim().is_empty() {
                RecommenderConfig::default()
            } else {
                serde_yaml::from_str(text).context("invalid YAML configuration")?
            }
        }
    };
    config.validate()?;
    Ok(config)
}

/// Read and parse one config file.
pub fn load_config_file(path: &Path) -> Result<RecommenderConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_config(&text, ConfigFormat::from_path(path))
        .with_context(|| format!("failed to load config file {}", path.display()))?;
    debug!(target: "skillrec::config", path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Split a `key=value` override.
pub fn parse_override(raw: &str) -> Result<(String, String)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("override {raw:?} must have the form key=value");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("override {raw:?} has an empty key");
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Render a configuration as TOML.
pub fn render_toml(config: &RecommenderConfig) -> Result<String> {
    toml::to_string_pretty(config).context("failed to serialize configuration")
}

/// Where the effective configuration came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Final configuration after every layer.
    pub config: RecommenderConfig,
    /// Config file that was read, if any.
    pub file: Option<PathBuf>,
    /// Overrides applied from the environment.
    pub env_overrides: Vec<(String, String)>,
}

/// Builds the effective configuration from file, environment and overrides.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    overrides: Vec<(String, String)>,
    skip_env: bool,
}

impl ConfigLoader {
    /// Loader with no explicit file or overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read this file instead of searching for one. It must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Add `key=value` overrides, applied last.
    pub fn with_overrides<I, S>(mut self, raw: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in raw {
            self.overrides.push(parse_override(item.as_ref())?);
        }
        Ok(self)
    }

    /// Ignore `SKILLREC_<OPTION>` variables.
    pub fn without_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Resolve the config file: explicit path, then `SKILLREC_CONFIG`, then
    /// `~/.skillrec/config.toml` when it exists.
    fn resolve_file(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = self.explicit_file.clone().or_else(config_file_from_env) {
            if !path.exists() {
                bail!("config file {} does not exist", path.display());
            }
            return Ok(Some(path));
        }
        Ok(default_config_file().filter(|p| p.exists()))
    }

    /// Build the effective configuration.
    pub fn load(&self) -> Result<LoadedConfig> {
        let file = self.resolve_file()?;
        let mut config = match &file {
            Some(path) => load_config_file(path)?,
            None => RecommenderConfig::default(),
        };

        let env_overrides = if self.skip_env {
            Vec::new()
        } else {
            env_overrides()
        };
        for (key, value) in &env_overrides {
            config = config
                .with_override(key, value)
                .with_context(|| format!("invalid environment override for {key}"))?;
        }
        for (key, value) in &self.overrides {
            config = config
                .with_override(key, value)
                .with_context(|| format!("invalid override {key}={value}"))?;
        }

        debug!(
            target: "skillrec::config",
            file = ?file,
            env_overrides = env_overrides.len(),
            overrides = self.overrides.len(),
            "Resolved configuration"
        );
        Ok(LoadedConfig {
            config,
            file,
            env_overrides,
        })
    }
}
