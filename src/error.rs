//! Facade errors.

use thiserror::Error;

use modelgate_config::ConfigError;
use modelgate_protocols::DriverError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("cannot initialize logging: {0}")]
    Logging(String),
}
