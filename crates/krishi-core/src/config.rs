//! Configuration loading.
//!
//! A single TOML file (`config.toml` by default). Every field has a default,
//! so a missing file or an empty file both yield a working rules-only setup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::error::KrishiError;

/// Top-level Krishi Sahayak configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// General assistant settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Domain registry settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RegistryConfig {
    /// Optional TOML file with registry overrides (extra greetings, topic
    /// synonyms, off-topic keywords, and advisory facts). When absent, the
    /// built-in registry is used as-is.
    #[serde(default)]
    pub path: Option<String>,
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// "builtin" answers from the rule engine only; "groq" also enables the
    /// language-model handoff for in-domain questions without a canned fact.
    #[serde(default = "default_provider")]
    pub default: String,
    pub groq: Option<GroqConfig>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: default_provider(),
            groq: None,
        }
    }
}

/// Groq chat-completions backend config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API key. Empty means "read the GROQ_API_KEY environment variable".
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request; transient failures are retried with
    /// exponential backoff.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_groq_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl GroqConfig {
    /// Resolve the API key: config value first, then the GROQ_API_KEY env var.
    pub fn resolved_api_key(&self) -> String {
        if !self.api_key.is_empty() {
            return self.api_key.clone();
        }
        std::env::var("GROQ_API_KEY").unwrap_or_default()
    }
}

fn default_name() -> String {
    "Krishi Sahayak".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider() -> String {
    "builtin".to_string()
}

fn default_groq_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Load configuration from a TOML file, falling back to defaults when the
/// file does not exist.
pub fn load(path: &str) -> Result<Config, KrishiError> {
    if !Path::new(path).exists() {
        warn!("config file {path} not found, using defaults");
        return Ok(Config::default());
    }

    let raw = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)
        .map_err(|e| KrishiError::Config(format!("failed to parse {path}: {e}")))?;

    info!("loaded config from {path}");
    Ok(config)
}
