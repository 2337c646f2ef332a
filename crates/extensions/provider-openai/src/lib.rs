//! OpenAI Chat Completions driver for modelgate.

mod api;
mod converter;
mod parser;
mod provider;

pub use parser::TOKEN_FIELDS;
pub use provider::{DRIVER_NAME, OpenAIDriver};
