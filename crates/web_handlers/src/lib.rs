//! # Web Handlers for the Camply Web Interface
//!
//! Actix-web handlers that mount one page per request and render it as HTML.

/// Shared API clients handed to every handler.
mod state;
pub use state::*;

/// Home page, health check and not-found handlers.
mod page_handlers;
pub use page_handlers::*;

/// Alert creation form handlers.
mod form_handlers;
pub use form_handlers::*;

/// Alert list, delete, test, pause/resume and history handlers.
mod notification_handlers;
pub use notification_handlers::*;

/// Route table.
mod routes;
pub use routes::*;
