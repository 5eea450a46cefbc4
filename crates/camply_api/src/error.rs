use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::warn;

/// Custom error type for backend API calls
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Network(String),

    /// The backend rejected the request
    #[error(
        "Validation error (HTTP {status}): {}",
        .detail.as_deref().unwrap_or("request rejected")
    )]
    Validation {
        /// HTTP status code returned by the backend
        status: u16,
        /// The backend's `detail` message, when it sent one
        detail: Option<String>,
    },

    /// The requested resource does not exist
    #[error("Not found")]
    NotFound,

    /// The backend failed to handle the request
    #[error("Server error (HTTP {status})")]
    Server {
        /// HTTP status code returned by the backend
        status: u16,
        /// The backend's `detail` message, when it sent one
        detail: Option<String>,
    },

    /// The response body was not what the client expected
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The backend-provided detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation { detail, .. } | ApiError::Server { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }
}

/// Sends a request and turns transport failures and non-success statuses into `ApiError`.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(format!("HTTP request failed: {}", e)))?;

    check_response(response).await
}

async fn check_response(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read response body".to_string());
    warn!("API request failed with status {}: {}", status, body);

    let detail = extract_detail(&body);
    match status.as_u16() {
        404 => Err(ApiError::NotFound),
        code @ 400..=499 => Err(ApiError::Validation {
            status: code,
            detail,
        }),
        code => Err(ApiError::Server {
            status: code,
            detail,
        }),
    }
}

/// Only string details are surfaced; structured validation details are dropped.
fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("detail")?.as_str().map(str::to_string)
}

pub(crate) async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::DataFormat(format!("Failed to parse response: {}", e)))
}
