//! # modelgate Provider - Gemini
//!
//! Google Gemini driver. Images go through the Files API and context caches
//! are `cachedContents` resources held by the service.

mod client;
mod parser;
mod provider;
mod types;

pub use parser::TOKEN_FIELDS;
pub use provider::{CachedContentHandle, DRIVER_NAME, GeminiDriver};
pub use types::*;
