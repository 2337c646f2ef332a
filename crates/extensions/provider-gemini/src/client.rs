//! Gemini API client.

use reqwest::Client;
use tracing::debug;

use modelgate_protocols::http::{build_client, join_url, send_empty, send_json};
use modelgate_protocols::{DriverError, DriverOptions, Operation};

use crate::types::*;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

/// Gemini API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(api_key: impl Into<String>, options: &DriverOptions) -> Result<Self, DriverError> {
        Ok(Self {
            client: build_client(options)?,
            api_key: api_key.into(),
            base_url: options
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate content (non-streaming).
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, DriverError> {
        let url = self.url(&format!("{}:generateContent", model_resource(model)));
        debug!(model, cached = request.cached_content.is_some(), "gemini generate_content");

        let request = self.client.post(url).header("x-goog-api-key", &self.api_key).json(request);
        send_json(request, Operation::GenerateContent).await
    }

    /// Upload `data` through the media endpoint as a single raw request.
    pub async fn upload_file(&self, data: Vec<u8>, mime_type: &str) -> Result<File, DriverError> {
        let url = join_url(&self.base_url, &format!("upload/{API_VERSION}/files"));
        debug!(bytes = data.len(), mime_type, "gemini upload_file");

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "raw")
            .header("Content-Type", mime_type)
            .body(data);
        let response: UploadFileResponse = send_json(request, Operation::UploadFile).await?;
        Ok(response.file)
    }

    /// Delete an uploaded file by resource name (`files/...`).
    pub async fn delete_file(&self, name: &str) -> Result<(), DriverError> {
        debug!(name, "gemini delete_file");
        self.delete(name, Operation::DeleteFile).await
    }

    /// Create a `cachedContents` resource.
    pub async fn create_cached_content(
        &self,
        request: &CreateCachedContentRequest,
    ) -> Result<CachedContent, DriverError> {
        debug!(model = %request.model, ttl = %request.ttl, "gemini create cached content");

        let request = self
            .client
            .post(self.url("cachedContents"))
            .header("x-goog-api-key", &self.api_key)
            .json(request);
        send_json(request, Operation::CreateCache).await
    }

    /// Delete a `cachedContents` resource by name (`cachedContents/...`).
    pub async fn delete_cached_content(&self, name: &str) -> Result<(), DriverError> {
        debug!(name, "gemini delete cached content");
        self.delete(name, Operation::DeleteCache).await
    }

    async fn delete(&self, name: &str, operation: Operation) -> Result<(), DriverError> {
        let request = self.client.delete(self.url(name)).header("x-goog-api-key", &self.api_key);
        send_empty(request, operation).await
    }

    fn url(&self, resource: &str) -> String {
        join_url(&self.base_url, &format!("{API_VERSION}/{resource}"))
    }
}

/// `gemini-1.5-flash` -> `models/gemini-1.5-flash`; already-qualified names pass through.
pub fn model_resource(model: &str) -> String {
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_resource() {
        assert_eq!(model_resource("gemini-1.5-flash"), "models/gemini-1.5-flash");
        assert_eq!(model_resource("models/gemini-pro"), "models/gemini-pro");
        assert_eq!(model_resource("tunedModels/mine"), "tunedModels/mine");
    }

    #[test]
    fn test_default_base_url() {
        let client = GeminiClient::new("key", &DriverOptions::default()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_resource_url() {
        let options = DriverOptions::default().with_base_url("http://localhost:8080/");
        let client = GeminiClient::new("key", &options).unwrap();
        assert_eq!(
            client.url("models/gemini-pro:generateContent"),
            "http://localhost:8080/v1beta/models/gemini-pro:generateContent"
        );
        assert_eq!(client.url("files/abc"), "http://localhost:8080/v1beta/files/abc");
    }
}
