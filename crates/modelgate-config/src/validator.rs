//! Configuration validation.

use crate::schema::Config;

/// Backend names the drivers understand.
pub const KNOWN_BACKENDS: [&str; 4] = ["anthropic", "google", "gemini", "openai"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_logging(config, &mut result);
        Self::validate_default_provider(config, &mut result);
        Self::validate_providers(config, &mut result);
        result
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new("logging.level", "level cannot be empty"));
        }
    }

    fn validate_default_provider(config: &Config, result: &mut ValidationResult) {
        if let Some(ref name) = config.default_provider {
            if !config.providers.contains_key(name) {
                result.add_error(ValidationError::new(
                    "default_provider",
                    format!("no provider profile named '{}'", name),
                ));
            }
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        for (name, provider) in &config.providers {
            let backend = provider.backend.to_ascii_lowercase();
            if !KNOWN_BACKENDS.contains(&backend.as_str()) {
                result.add_error(ValidationError::new(
                    format!("providers.{}.backend", name),
                    format!(
                        "Unknown backend '{}', valid values: {:?}",
                        provider.backend, KNOWN_BACKENDS
                    ),
                ));
            }

            if provider.model.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("providers.{}.model", name),
                    "model cannot be empty",
                ));
            }

            match provider.api_key.as_deref() {
                None => result.add_error(ValidationError::new(
                    format!("providers.{}.api_key", name),
                    "API key is not set; use ${VAR} to read it from the environment",
                )),
                Some("") => result.add_warning(ValidationWarning::new(
                    format!("providers.{}.api_key", name),
                    "API key is empty",
                )),
                Some(_) => {}
            }

            if let Some(ref url) = provider.base_url {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    result.add_error(ValidationError::new(
                        format!("providers.{}.base_url", name),
                        "base_url must start with http:// or https://",
                    ));
                }
            }

            if provider.max_tokens == Some(0) {
                result.add_error(ValidationError::new(
                    format!("providers.{}.max_tokens", name),
                    "max_tokens must be greater than 0",
                ));
            }

            if provider.timeout_seconds == Some(0) {
                result.add_error(ValidationError::new(
                    format!("providers.{}.timeout_seconds", name),
                    "timeout_seconds must be greater than 0",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
