//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use modelgate_config::{LogFormat, LoggingConfig};

use crate::error::Error;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails if a global
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Error> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(env.as_deref(), &config.level)?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.format {
        LogFormat::Text => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
    };
    result.map_err(|e| Error::Logging(e.to_string()))
}

/// Build the filter from `RUST_LOG` when set and valid, else from `level`.
fn build_filter(env: Option<&str>, level: &str) -> Result<EnvFilter, Error> {
    if let Some(filter) = env.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| Error::Logging(format!("invalid level '{level}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_build_filter_from_level() {
        let filter = build_filter(None, "modelgate=debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_build_filter_env_wins() {
        let filter = build_filter(Some("warn"), "debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_build_filter_bad_env_falls_back() {
        let filter = build_filter(Some("x=notalevel"), "info").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_build_filter_bad_level() {
        let err = build_filter(None, "x=notalevel").unwrap_err();
        assert!(matches!(err, Error::Logging(_)));
    }

    #[test]
    fn test_init_logging_only_once() {
        let config = LoggingConfig::default();
        let _ = init_logging(&config);
        assert!(matches!(init_logging(&config), Err(Error::Logging(_))));
    }
}
