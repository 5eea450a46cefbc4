//! # Camply API
//!
//! This crate provides typed clients for the Camply backend: the notification
//! (alert subscription) endpoints and the search endpoints for recreation areas,
//! campgrounds and campsites.

/// Backend location and HTTP client settings.
mod config;
pub use config::*;

/// Error taxonomy shared by both clients.
mod error;
pub use error::*;

/// Transport types exchanged with the backend.
mod types;
pub use types::*;

/// Client for the notification endpoints.
mod notifications;
pub use notifications::*;

/// Client for the search endpoints.
mod search;
pub use search::*;
