//! HTTP plumbing shared by the drivers.

use serde::de::DeserializeOwned;

use crate::driver::DriverOptions;
use crate::error::{DriverError, Operation};

/// Build the HTTP client for a driver.
pub fn build_client(options: &DriverOptions) -> Result<reqwest::Client, DriverError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| DriverError::Config(format!("cannot build HTTP client: {e}")))
}

/// Join a base URL and a path with exactly one slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send `request` and decode the JSON body of a successful response.
pub async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    operation: Operation,
) -> Result<T, DriverError> {
    let body = send(request, operation).await?;
    serde_json::from_str(&body).map_err(|e| DriverError::InvalidResponse {
        operation,
        message: format!("cannot parse response: {e}"),
    })
}

/// Send `request`, discarding the body of a successful response.
pub async fn send_empty(
    request: reqwest::RequestBuilder,
    operation: Operation,
) -> Result<(), DriverError> {
    send(request, operation).await.map(|_| ())
}

async fn send(request: reqwest::RequestBuilder, operation: Operation) -> Result<String, DriverError> {
    let response = request
        .send()
        .await
        .map_err(|e| DriverError::from_reqwest(operation, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DriverError::from_reqwest(operation, e))?;

    if !status.is_success() {
        return Err(DriverError::from_api_response(operation, status.as_u16(), &body));
    }
    Ok(body)
}
