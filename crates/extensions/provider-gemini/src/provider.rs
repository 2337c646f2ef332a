//! Gemini driver implementation.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use modelgate_protocols::driver::user_turns;
use modelgate_protocols::media::read_image;
use modelgate_protocols::{Completion, Driver, DriverError, DriverOptions, FileSystem};

use crate::client::{GeminiClient, model_resource};
use crate::parser::parse_response;
use crate::types::*;

/// Backend identity reported by [`GeminiDriver`].
pub const DRIVER_NAME: &str = "google";

/// Handle to the active `cachedContents` resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedContentHandle {
    pub name: String,
    pub expire_time: Option<DateTime<Utc>>,
}

/// Gemini LLM driver.
///
/// A dropped driver still holding a cache schedules its deletion on the
/// current Tokio runtime, if any.
pub struct GeminiDriver {
    client: GeminiClient,
    model: String,
    max_tokens: Option<u32>,
    cache: Option<CachedContentHandle>,
}

impl GeminiDriver {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Result<Self, DriverError> {
        Self::with_options(model, api_key, DriverOptions::default())
    }

    pub fn with_options(
        model: impl Into<String>,
        api_key: impl Into<String>,
        options: DriverOptions,
    ) -> Result<Self, DriverError> {
        Ok(Self {
            client: GeminiClient::new(api_key, &options)?,
            model: model.into(),
            max_tokens: options.max_tokens,
            cache: None,
        })
    }

    /// The active cache, if any.
    pub fn cached_content(&self) -> Option<&CachedContentHandle> {
        self.cache.as_ref()
    }

    /// Delete a `cachedContents` resource by name.
    ///
    /// Used to retry the cleanup reported by [`DriverError::OrphanedCache`].
    pub async fn delete_cached_content(&self, name: &str) -> Result<(), DriverError> {
        self.client
            .delete_cached_content(name)
            .await
            .map_err(DriverError::cache)
    }

    fn cached_content_name(&self) -> Option<String> {
        self.cache.as_ref().map(|handle| handle.name.clone())
    }

    fn build_request(&self, content: Content, cached_content: Option<String>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![content],
            cached_content,
            generation_config: self.max_tokens.map(|max| GenerationConfig {
                max_output_tokens: Some(max),
            }),
        }
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<Completion, DriverError> {
        let response = self.client.generate_content(&self.model, request).await?;
        debug!(
            model_version = response.model_version.as_deref().unwrap_or_default(),
            candidates = response.candidates.len(),
            "gemini content generated"
        );
        parse_response(response)
    }
}

#[async_trait]
impl Driver for GeminiDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn query_with_text(&self, input: &str, context: &[String]) -> Result<Completion, DriverError> {
        let content = Content::user_texts(user_turns(input, context, None));
        self.generate(&self.build_request(content, self.cached_content_name())).await
    }

    async fn query_with_image(
        &self,
        input: &str,
        fs: &dyn FileSystem,
        path: &str,
    ) -> Result<Completion, DriverError> {
        let (data, mime_type) = read_image(fs, path).await?;
        let file = self.client.upload_file(data, &mime_type).await?;
        let mut upload = UploadGuard::new(self.client.clone(), file.name.clone());

        let content = Content {
            role: "user".to_string(),
            parts: vec![Part::file(file.uri, mime_type), Part::text(input)],
        };
        let result = self
            .generate(&self.build_request(content, self.cached_content_name()))
            .await;

        if let Err(e) = upload.release().await {
            warn!(file = %file.name, error = %e, "uploaded file not deleted");
        }
        result
    }

    async fn create_cache(&mut self, context: Vec<String>, ttl: Duration) -> Result<(), DriverError> {
        self.clear_cache().await?;

        let request = CreateCachedContentRequest {
            model: model_resource(&self.model),
            contents: vec![Content::user_texts(context.iter().map(String::as_str))],
            ttl: format_ttl(ttl),
        };
        let cached = self
            .client
            .create_cached_content(&request)
            .await
            .map_err(DriverError::cache)?;

        debug!(name = %cached.name, "gemini cache created");
        self.cache = Some(CachedContentHandle {
            name: cached.name,
            expire_time: cached.expire_time,
        });
        Ok(())
    }

    async fn clear_cache(&mut self) -> Result<(), DriverError> {
        let Some(handle) = self.cache.take() else {
            return Ok(());
        };
        self.client
            .delete_cached_content(&handle.name)
            .await
            .map_err(|source| DriverError::OrphanedCache {
                name: handle.name,
                source: Box::new(source),
            })
    }

    fn has_cache(&self) -> bool {
        self.cache.is_some()
    }
}

impl Drop for GeminiDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.cache.take() {
            let client = self.client.clone();
            spawn_cleanup(handle.name.clone(), async move {
                client.delete_cached_content(&handle.name).await
            });
        }
    }
}

/// Deletes an uploaded file. If the owning future is dropped before
/// [`UploadGuard::release`] runs, deletion is scheduled on the runtime.
struct UploadGuard {
    client: GeminiClient,
    name: Option<String>,
}

impl UploadGuard {
    fn new(client: GeminiClient, name: String) -> Self {
        Self {
            client,
            name: Some(name),
        }
    }

    /// The name is held until the delete finishes, so a release interrupted
    /// mid-request is still retried on drop.
    async fn release(&mut self) -> Result<(), DriverError> {
        let Some(name) = self.name.as_deref() else {
            return Ok(());
        };
        let result = self.client.delete_file(name).await;
        self.name = None;
        result
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        if let Some(name) = self.name.take() {
            let client = self.client.clone();
            spawn_cleanup(name.clone(), async move { client.delete_file(&name).await });
        }
    }
}

fn spawn_cleanup<F>(name: String, cleanup: F)
where
    F: Future<Output = Result<(), DriverError>> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(async move {
                if let Err(e) = cleanup.await {
                    warn!(%name, error = %e, "background cleanup failed");
                }
            });
        }
        Err(_) => warn!(%name, "no runtime available, remote resource left in place"),
    }
}

/// Duration as a protobuf duration string, e.g. `"300s"`.
fn format_ttl(ttl: Duration) -> String {
    if ttl.subsec_nanos() == 0 {
        format!("{}s", ttl.as_secs())
    } else {
        format!("{}s", ttl.as_secs_f64())
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
