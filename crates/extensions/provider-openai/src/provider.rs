//! OpenAI driver implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use modelgate_protocols::driver::user_turns;
use modelgate_protocols::http::{build_client, join_url, send_json};
use modelgate_protocols::media::read_image;
use modelgate_protocols::{Completion, Driver, DriverError, DriverOptions, FileSystem, Operation};

use crate::api::{ApiMessage, ApiRequest, ApiResponse};
use crate::converter::{image_message, text_messages};
use crate::parser::parse_response;

/// Backend identity reported by [`OpenAIDriver`].
pub const DRIVER_NAME: &str = "openai";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI Chat Completions driver.
///
/// Works against any OpenAI-compatible gateway when given a base URL.
/// Cached context is held locally and appended after the caller's context.
pub struct OpenAIDriver {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: Option<u32>,
    client: reqwest::Client,
    cache: Option<Vec<String>>,
}

impl OpenAIDriver {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Result<Self, DriverError> {
        Self::with_options(model, api_key, DriverOptions::default())
    }

    pub fn with_options(
        model: impl Into<String>,
        api_key: impl Into<String>,
        options: DriverOptions,
    ) -> Result<Self, DriverError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: options
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.into(),
            max_tokens: options.max_tokens,
            client: build_client(&options)?,
            cache: None,
        })
    }

    /// Strings currently appended to every text query.
    pub fn cached_context(&self) -> Option<&[String]> {
        self.cache.as_deref()
    }

    fn build_request(&self, messages: Vec<ApiMessage>) -> ApiRequest {
        ApiRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
        }
    }

    async fn send_request(&self, api_request: &ApiRequest) -> Result<Completion, DriverError> {
        debug!(model = %self.model, messages = api_request.messages.len(), "openai chat completion");

        let request = self
            .client
            .post(join_url(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(api_request);

        let response: ApiResponse = send_json(request, Operation::GenerateContent).await?;
        debug!(id = %response.id, choices = response.choices.len(), "openai completion received");
        parse_response(response)
    }
}

#[async_trait]
impl Driver for OpenAIDriver {
    fn name(&self) -> &str {
        DRIVER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn query_with_text(&self, input: &str, context: &[String]) -> Result<Completion, DriverError> {
        let turns = user_turns(input, context, self.cached_context());
        let api_request = self.build_request(text_messages(&turns));
        self.send_request(&api_request).await
    }

    async fn query_with_image(
        &self,
        input: &str,
        fs: &dyn FileSystem,
        path: &str,
    ) -> Result<Completion, DriverError> {
        let (data, media_type) = read_image(fs, path).await?;
        let api_request = self.build_request(vec![image_message(input, &data, &media_type)]);
        self.send_request(&api_request).await
    }

    async fn create_cache(&mut self, context: Vec<String>, _ttl: Duration) -> Result<(), DriverError> {
        self.clear_cache().await?;
        self.cache = Some(context);
        Ok(())
    }

    async fn clear_cache(&mut self) -> Result<(), DriverError> {
        self.cache = None;
        Ok(())
    }

    fn has_cache(&self) -> bool {
        self.cache.is_some()
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
