//! Configuration for blogsmith
//!
//! Loaded from TOML. Every section has defaults, so an absent or partial file
//! still yields a usable configuration. The API key itself never lives in the
//! file; it is read from the environment variable named by `api.api_key_env`.

use crate::llm::LLMError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "blogsmith.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation service settings
    pub api: ApiConfig,

    /// Site identity used in meta tags and link counting
    pub site: SiteConfig,

    /// Post persistence
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Resolve and load the configuration.
    ///
    /// An explicit path must exist. Otherwise `./blogsmith.toml`, then
    /// `<config dir>/blogsmith/config.toml`, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }

        for candidate in Self::search_paths() {
            if candidate.is_file() {
                debug!("Loading config from {}", candidate.display());
                return Ok((Self::from_file(&candidate)?, Some(candidate)));
            }
        }

        debug!("No config file found, using defaults");
        Ok((Self::default(), None))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("blogsmith").join("config.toml"));
        }
        paths
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, LLMError> {
        match std::env::var(&self.api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(LLMError::config(format!(
                "{} is not set; an API key is required to reach the generation service",
                self.api.api_key_env
            ))),
        }
    }
}

/// Generation service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,

    /// REST base URL
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature for content generation
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: u32,

    /// Content-generation fallback chain, most preferred first
    pub generation_models: Vec<String>,

    /// Constraint-parsing fallback chain, most preferred first
    pub parsing_models: Vec<String>,

    /// Pause between model attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 120,
            temperature: 0.7,
            max_output_tokens: 8192,
            generation_models: default_model_chain(),
            parsing_models: vec![
                "gemini-2.5-flash".to_string(),
                "gemini-2.0-flash".to_string(),
                "gemini-1.5-flash".to_string(),
            ],
            retry_delay_ms: 1000,
        }
    }
}

/// Flagship, its cost-efficient variant, the previous generation of both,
/// an older stable release and the smallest release.
pub fn default_model_chain() -> Vec<String> {
    [
        "gemini-2.5-pro",
        "gemini-2.5-flash",
        "gemini-2.0-pro-exp",
        "gemini-2.0-flash",
        "gemini-1.5-pro",
        "gemini-1.5-flash-8b",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

/// Site identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub url: String,
    pub logo_url: String,
    pub twitter_handle: String,

    /// Keywords always added to meta keywords and tracked as related keywords
    pub default_keywords: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Blogsmith".to_string(),
            url: "https://example.com".to_string(),
            logo_url: "https://example.com/logo.png".to_string(),
            twitter_handle: "@blogsmith".to_string(),
            default_keywords: vec![
                "remote jobs".to_string(),
                "career".to_string(),
                "hiring".to_string(),
                "salary".to_string(),
            ],
        }
    }
}

impl SiteConfig {
    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Post persistence settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding generated posts
    pub output_dir: PathBuf,

    /// Records kept by `cleanup`
    pub keep: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { output_dir: PathBuf::from("generated-posts"), keep: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.api.generation_models.len(), 6);
        assert_eq!(config.api.retry_delay_ms, 1000);
        assert_eq!(config.store.keep, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blogsmith.toml");
        std::fs::write(
            &path,
            "[site]\nurl = \"https://jobs.example.org/\"\n\n[store]\nkeep = 3\n",
        )
        .unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(source.as_deref(), Some(path.as_path()));
        assert_eq!(config.site.base_url(), "https://jobs.example.org");
        assert_eq!(config.site.name, "Blogsmith");
        assert_eq!(config.store.keep, 3);
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.api.retry_delay_ms = 250;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.api.retry_delay_ms, 250);
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let mut config = Config::default();
        config.api.api_key_env = "BLOGSMITH_TEST_KEY_THAT_IS_NEVER_SET".to_string();
        let err = config.api_key().unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("BLOGSMITH_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
