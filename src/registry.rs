//! Backend selection and driver construction.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use modelgate_config::{Config, ConfigError, ConfigValidator};
use modelgate_protocols::{Driver, DriverError, DriverOptions};
use modelgate_provider_anthropic::AnthropicDriver;
use modelgate_provider_gemini::GeminiDriver;
use modelgate_provider_openai::OpenAIDriver;

use crate::error::Error;

/// The supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Anthropic,
    Google,
    OpenAI,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Anthropic, Backend::Google, Backend::OpenAI];

    /// The name reported by this backend's driver.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Anthropic => modelgate_provider_anthropic::DRIVER_NAME,
            Backend::Google => modelgate_provider_gemini::DRIVER_NAME,
            Backend::OpenAI => modelgate_provider_openai::DRIVER_NAME,
        }
    }

    /// Usage keys reported by this backend's driver.
    pub fn token_fields(&self) -> &'static [&'static str] {
        match self {
            Backend::Anthropic => &modelgate_provider_anthropic::TOKEN_FIELDS,
            Backend::Google => &modelgate_provider_gemini::TOKEN_FIELDS,
            Backend::OpenAI => &modelgate_provider_openai::TOKEN_FIELDS,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Backend::Anthropic),
            "google" | "gemini" => Ok(Backend::Google),
            "openai" => Ok(Backend::OpenAI),
            other => Err(DriverError::Config(format!("unknown backend '{other}'"))),
        }
    }
}

/// Build a driver with default options.
pub fn connect(backend: Backend, model: &str, api_key: &str) -> Result<Box<dyn Driver>, DriverError> {
    connect_with(backend, model, api_key, DriverOptions::default())
}

/// Build a driver.
pub fn connect_with(
    backend: Backend,
    model: &str,
    api_key: &str,
    options: DriverOptions,
) -> Result<Box<dyn Driver>, DriverError> {
    let driver: Box<dyn Driver> = match backend {
        Backend::Anthropic => Box::new(AnthropicDriver::with_options(model, api_key, options)?),
        Backend::Google => Box::new(GeminiDriver::with_options(model, api_key, options)?),
        Backend::OpenAI => Box::new(OpenAIDriver::with_options(model, api_key, options)?),
    };
    Ok(driver)
}

/// Build the driver for a configured provider profile.
///
/// `profile` falls back to `default_provider`, then to the only profile.
/// Validation errors for the selected profile are reported as
/// [`ConfigError::InvalidValue`].
pub fn from_config(config: &Config, profile: Option<&str>) -> Result<Box<dyn Driver>, Error> {
    let (name, provider) = config.provider(profile)?;

    let prefix = format!("providers.{name}.");
    let validation = ConfigValidator::validate(config);
    if let Some(invalid) = validation.errors.into_iter().find(|e| e.path.starts_with(&prefix)) {
        return Err(ConfigError::InvalidValue {
            field: invalid.path,
            message: invalid.message,
        }
        .into());
    }

    let backend: Backend = provider.backend.parse()?;
    let api_key = provider
        .api_key
        .as_deref()
        .ok_or_else(|| ConfigError::MissingField(format!("{prefix}api_key")))?;

    let options = DriverOptions {
        base_url: provider.base_url.clone(),
        max_tokens: provider.max_tokens,
        timeout: provider.timeout(),
    };

    debug!(profile = name, %backend, model = %provider.model, "building driver");
    Ok(connect_with(backend, &provider.model, api_key, options)?)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
