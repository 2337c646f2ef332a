//! Configuration loader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.display().to_string()),
            _ => ConfigError::Io(e),
        })?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load `modelgate/config.toml` from the user's configuration directory.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = Self::default_path()
            .ok_or_else(|| ConfigError::NotFound("user configuration directory".to_string()))?;
        Self::load(&path)
    }

    /// `<config dir>/modelgate/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("modelgate").join("config.toml"))
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "${VAR}".to_string(),
            message: e.to_string(),
        })?;

        let mut missing = None;
        let expanded = re.replace_all(content, |cap: &Captures| match std::env::var(&cap[1]) {
            Ok(value) => value,
            Err(_) => {
                missing.get_or_insert_with(|| cap[1].to_string());
                String::new()
            }
        });

        match missing {
            Some(var_name) => Err(ConfigError::EnvVarNotSet(var_name)),
            None => Ok(expanded.into_owned()),
        }
    }
}
