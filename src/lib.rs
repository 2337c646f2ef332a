//! # modelgate
//!
//! One [`Driver`] interface over three LLM backends: Anthropic Messages,
//! Google Gemini and OpenAI Chat Completions.
//!
//! ```no_run
//! # async fn run() -> Result<(), modelgate::Error> {
//! use modelgate::{Backend, Driver};
//!
//! let driver = modelgate::connect(Backend::Anthropic, "claude-sonnet-4-20250514", "sk-ant-...")?;
//! let completion = driver.query_with_text("Summarize this", &["earlier turn".to_string()]).await?;
//! println!("{}", completion.text());
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;
mod registry;

pub use error::Error;
pub use registry::{Backend, connect, connect_with, from_config};

pub use modelgate_config as config;
pub use modelgate_protocols::{
    Completion, DirFs, Driver, DriverError, DriverOptions, ErrorKind, FileSystem, MapFs, Operation,
    STOP_PREFIX, Usage,
};

pub use modelgate_provider_anthropic::AnthropicDriver;
pub use modelgate_provider_gemini::{CachedContentHandle, GeminiDriver};
pub use modelgate_provider_openai::OpenAIDriver;
