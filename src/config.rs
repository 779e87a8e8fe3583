//! Run configuration.
//!
//! A [`Config`] is loaded once per run from an optional YAML file and then
//! passed by reference to the engine and collaborators. Every field has a
//! default, so a file only needs to name what it overrides:
//!
//! ```yaml
//! engine:
//!   max_claims_per_article: 5
//!   similarity_threshold: 0.2
//! fetch:
//!   use_proxy: false
//! ```

use crate::error::ConfigError;
use crate::feeds::FeedCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub fetch: FetchConfig,
    pub feeds: FeedCatalog,
}

impl Config {
    /// Load configuration from a YAML file, or defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, is not valid
    /// YAML, or holds out-of-range engine values.
    #[instrument(level = "info", skip_all)]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let config: Config = serde_yaml::from_str(&raw)?;
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            None => {
                info!("No config file given; using defaults");
                Config::default()
            }
        };
        config.engine.validate()?;
        Ok(config)
    }
}

/// Tunables for the analysis engine.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Entries kept per feed document.
    pub max_items_per_feed: usize,
    /// Claims extracted per article.
    pub max_claims_per_article: usize,
    /// Overlap score a candidate must exceed to count as a match.
    pub similarity_threshold: f64,
    /// Characters of the claim used for the substring fast path.
    pub prefix_chars: usize,
    /// Shortest run of non-terminal characters accepted as a sentence.
    pub min_sentence_chars: usize,
    /// Longest run of non-terminal characters accepted as a sentence.
    pub max_sentence_chars: usize,
    pub confidence: ConfidenceConfig,
    /// Reduce markup in descriptions to plain text.
    pub strip_html: bool,
    /// Rewrite partisan and sensational wording before analysis.
    pub neutralize_loaded_language: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_items_per_feed: 25,
            max_claims_per_article: 4,
            similarity_threshold: 0.18,
            prefix_chars: 30,
            min_sentence_chars: 30,
            max_sentence_chars: 250,
            confidence: ConfidenceConfig::default(),
            strip_html: true,
            neutralize_loaded_language: false,
        }
    }
}

impl EngineConfig {
    /// Check that every value is in a range the engine can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_sentence_chars == 0 {
            return Err(ConfigError::Invalid(
                "min_sentence_chars must be at least 1".to_string(),
            ));
        }
        if self.min_sentence_chars > self.max_sentence_chars {
            return Err(ConfigError::Invalid(format!(
                "min_sentence_chars ({}) exceeds max_sentence_chars ({})",
                self.min_sentence_chars, self.max_sentence_chars
            )));
        }
        if self.prefix_chars == 0 {
            return Err(ConfigError::Invalid(
                "prefix_chars must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::Invalid(format!(
                "similarity_threshold {} is outside [0, 1]",
                self.similarity_threshold
            )));
        }
        self.confidence.validate()
    }
}

/// Constants of the corroboration score.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Score of a claim with no evidence either way.
    pub base: f64,
    /// Credit per distinct corroborating source.
    pub per_source_bonus: f64,
    /// Sources beyond this count earn no further credit.
    pub max_bonus_sources: usize,
    /// Flat deduction when any fact-check entry matches.
    pub factcheck_penalty: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 0.5,
            per_source_bonus: 0.12,
            max_bonus_sources: 4,
            factcheck_penalty: 0.45,
        }
    }
}

impl ConfidenceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("base", self.base),
            ("per_source_bonus", self.per_source_bonus),
            ("factcheck_penalty", self.factcheck_penalty),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "confidence.{} {} is outside [0, 1]",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Settings for the feed fetch collaborator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Retry a failed direct fetch through `proxy_url`.
    pub use_proxy: bool,
    /// Prefix the percent-encoded feed URL is appended to.
    pub proxy_url: String,
    /// Feeds fetched at once.
    pub concurrency: usize,
    pub timeout_secs: u64,
    /// Attempts after the first before a source is given up on.
    pub max_retries: usize,
    /// First backoff delay; doubles per attempt.
    pub base_delay_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            use_proxy: true,
            proxy_url: "https://api.allorigins.win/raw?url=".to_string(),
            concurrency: 8,
            timeout_secs: 15,
            max_retries: 2,
            base_delay_ms: 500,
            user_agent: concat!("awful_fact_check/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
