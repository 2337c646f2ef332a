//! Driver trait definition.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;
use crate::fs::FileSystem;
use crate::types::Completion;

/// Core trait for LLM backends.
///
/// Queries take `&self`; cache management takes `&mut self`, so a driver
/// shared between tasks must be wrapped by the caller (for example in a
/// `tokio::sync::Mutex`) before its cache can change. Give each logical
/// session its own driver when sessions need different caches.
///
/// Dropping a returned future cancels the request in flight.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Fixed backend identity, e.g. `"anthropic"`.
    fn name(&self) -> &str;

    /// Model identifier supplied at construction.
    fn model(&self) -> &str;

    /// Send `input` followed by every `context` string as user content.
    async fn query_with_text(&self, input: &str, context: &[String]) -> Result<Completion, DriverError>;

    /// Send the image at `path` in `fs` together with `input`.
    async fn query_with_image(
        &self,
        input: &str,
        fs: &dyn FileSystem,
        path: &str,
    ) -> Result<Completion, DriverError>;

    /// Establish a context attached to every following text query,
    /// replacing the current one.
    async fn create_cache(&mut self, context: Vec<String>, ttl: Duration) -> Result<(), DriverError> {
        let _ = (context, ttl);
        Err(DriverError::CacheUnsupported(self.name().to_string()))
    }

    /// Release the current cache. Succeeds when nothing is cached.
    async fn clear_cache(&mut self) -> Result<(), DriverError> {
        Ok(())
    }

    /// Whether a cache is currently active.
    fn has_cache(&self) -> bool {
        false
    }
}

/// Construction options shared by all drivers.
#[derive(Debug, Clone, Default)]
pub struct DriverOptions {
    /// Override of the backend's API root.
    pub base_url: Option<String>,

    /// Generation limit, for backends that require one.
    pub max_tokens: Option<u32>,

    /// Per-request timeout. No timeout when unset.
    pub timeout: Option<Duration>,
}

impl DriverOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// User content units of a text query: `input`, then `context`, then `cached`.
pub fn user_turns<'a>(input: &'a str, context: &'a [String], cached: Option<&'a [String]>) -> Vec<&'a str> {
    std::iter::once(input)
        .chain(context.iter().map(String::as_str))
        .chain(cached.unwrap_or_default().iter().map(String::as_str))
        .collect()
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
