//! Configuration schema definitions.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Profile used when none is named explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    /// Provider profiles keyed by profile name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Resolve a provider profile.
    ///
    /// Without a name, `default_provider` is used, then the only profile
    /// when exactly one is configured.
    pub fn provider(&self, name: Option<&str>) -> Result<(&str, &ProviderConfig), ConfigError> {
        let name = match name.or(self.default_provider.as_deref()) {
            Some(name) => name,
            None if self.providers.len() == 1 => {
                let (name, provider) = self
                    .providers
                    .iter()
                    .next()
                    .ok_or_else(|| ConfigError::MissingField("providers".to_string()))?;
                return Ok((name.as_str(), provider));
            }
            None => return Err(ConfigError::MissingField("default_provider".to_string())),
        };

        self.providers
            .get_key_value(name)
            .map(|(name, provider)| (name.as_str(), provider))
            .ok_or_else(|| ConfigError::UnknownProvider(name.to_string()))
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A named provider profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend name: `anthropic`, `google` (alias `gemini`) or `openai`.
    pub backend: String,

    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Settings kept for callers; not interpreted by the drivers.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ProviderConfig {
    pub fn new(backend: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            model: model.into(),
            api_key: None,
            base_url: None,
            max_tokens: None,
            timeout_seconds: None,
            extra: HashMap::new(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
