use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use camply_api::{ApiConfig, ApiError};

/// Bind address used when `CAMPLY_WEB_ADDR` is not set.
pub const DEFAULT_WEB_ADDR: &str = "0.0.0.0:8080";

/// Directories searched for the stylesheet when `CAMPLY_STATIC_DIR` is not set.
const STATIC_DIR_CANDIDATES: [&str; 2] = ["./static", "../static"];

/// Invalid server configuration
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// `CAMPLY_WEB_ADDR` is not a socket address
    #[error("Invalid CAMPLY_WEB_ADDR '{0}': {1}")]
    InvalidAddress(String, std::net::AddrParseError),

    /// Backend settings are invalid
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api: ApiConfig,
    pub bind_addr: SocketAddr,
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api = ApiConfig::from_vars(&lookup)?;

        let raw_addr = lookup("CAMPLY_WEB_ADDR").unwrap_or_else(|| DEFAULT_WEB_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidAddress(raw_addr.clone(), e))?;

        Ok(Self {
            api,
            bind_addr,
            static_dir: resolve_static_dir(lookup("CAMPLY_STATIC_DIR")),
        })
    }
}

fn resolve_static_dir(explicit: Option<String>) -> Option<PathBuf> {
    if let Some(dir) = explicit.filter(|dir| !dir.trim().is_empty()) {
        let dir = PathBuf::from(dir.trim());
        if !dir.exists() {
            log::warn!("⚠️ CAMPLY_STATIC_DIR {} does not exist", dir.display());
        }
        return Some(dir);
    }

    let found = STATIC_DIR_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|dir| dir.exists())
        .map(Path::to_path_buf);
    if found.is_none() {
        log::info!("❌ Static files not found in {:?}", STATIC_DIR_CANDIDATES);
    }
    found
}
