use std::time::Duration;

use reqwest::{Client, Url};

use crate::ApiError;

/// Backend used when `CAMPLY_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Request timeout used when `CAMPLY_API_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the backend lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration for the given backend base URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');

        Url::parse(trimmed)
            .map_err(|e| ApiError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads `CAMPLY_API_URL` and `CAMPLY_API_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("CAMPLY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("CAMPLY_API_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("Invalid CAMPLY_API_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self::new(&base_url)?.with_timeout(Duration::from_secs(timeout_secs)))
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins an absolute API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds the HTTP client shared by the notification and search clients.
    ///
    /// The backend identifies the current user by session, so the client keeps cookies.
    pub fn build_http_client(&self) -> Result<Client, ApiError> {
        Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .user_agent(concat!("camply-web/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))
    }
}
