//! Driver errors.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// The driver step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ReadFile,
    DetectContentType,
    UploadFile,
    GenerateContent,
    DeleteFile,
    CreateCache,
    DeleteCache,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::ReadFile => "cannot read file",
            Operation::DetectContentType => "cannot parse content type",
            Operation::UploadFile => "cannot upload file",
            Operation::GenerateContent => "cannot generate content",
            Operation::DeleteFile => "cannot delete file",
            Operation::CreateCache => "cannot create cache",
            Operation::DeleteCache => "cannot delete cache",
        };
        f.write_str(text)
    }
}

/// Coarse classification of a [`DriverError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The image file could not be opened or read.
    Io,
    /// Content-type sniffing or media-type parsing failed.
    ContentType,
    /// The backend rejected or failed the request.
    Provider,
    /// The request deadline expired before the backend answered.
    Timeout,
    /// The backend answered without any content.
    NoCompletion,
    /// Creating or clearing a context cache failed.
    Cache,
    /// The driver was configured incorrectly.
    Config,
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("cannot read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse content type of {path}: {message}")]
    ContentType { path: String, message: String },

    #[error("{operation}: API error, status: {status}, type: {error_type}, message: {message}")]
    Api {
        operation: Operation,
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("{operation}: {message}")]
    Transport { operation: Operation, message: String },

    #[error("{operation}: request timed out")]
    Timeout { operation: Operation },

    #[error("{operation}: invalid response: {message}")]
    InvalidResponse { operation: Operation, message: String },

    #[error("no completion")]
    NoCompletion,

    #[error("cache error: {source}")]
    Cache {
        #[source]
        source: Box<DriverError>,
    },

    #[error("cached content {name} could not be deleted and is still held remotely: {source}")]
    OrphanedCache {
        name: String,
        #[source]
        source: Box<DriverError>,
    },

    #[error("{0} does not support context caching")]
    CacheUnsupported(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DriverError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DriverError::Io { .. } => ErrorKind::Io,
            DriverError::ContentType { .. } => ErrorKind::ContentType,
            DriverError::Api { .. }
            | DriverError::Transport { .. }
            | DriverError::InvalidResponse { .. } => ErrorKind::Provider,
            DriverError::Timeout { .. } => ErrorKind::Timeout,
            DriverError::NoCompletion => ErrorKind::NoCompletion,
            DriverError::Cache { .. }
            | DriverError::OrphanedCache { .. }
            | DriverError::CacheUnsupported(_) => ErrorKind::Cache,
            DriverError::Config(_) => ErrorKind::Config,
        }
    }

    /// Wrap a failure of a cache resource call.
    pub fn cache(source: DriverError) -> Self {
        DriverError::Cache {
            source: Box::new(source),
        }
    }

    /// Build an error from a non-success HTTP response.
    ///
    /// All three backends wrap failures as `{"error": {...}}`; the error type
    /// is read from `type` (Anthropic, OpenAI) or `status` (Gemini). Bodies
    /// that are not in that shape are kept verbatim as the message.
    pub fn from_api_response(operation: Operation, status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => DriverError::Api {
                operation,
                status,
                error_type: envelope
                    .error
                    .error_type
                    .or(envelope.error.status)
                    .unwrap_or_default(),
                message: envelope.error.message,
            },
            Err(_) => DriverError::Api {
                operation,
                status,
                error_type: String::new(),
                message: body.trim().to_string(),
            },
        }
    }

    /// Map a transport-level `reqwest` failure.
    pub fn from_reqwest(operation: Operation, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DriverError::Timeout { operation }
        } else if err.is_decode() {
            DriverError::InvalidResponse {
                operation,
                message: err.to_string(),
            }
        } else {
            DriverError::Transport {
                operation,
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    error_type: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
