//! Anthropic driver for modelgate.

mod api;
mod converter;
mod parser;
mod provider;

pub use parser::TOKEN_FIELDS;
pub use provider::{AnthropicDriver, DEFAULT_MAX_TOKENS, DRIVER_NAME};
