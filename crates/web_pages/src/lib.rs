//! # Web Pages
//!
//! Page state and HTML rendering for the Camply web front-end.
//! Every page is an isolated state object built fresh for each request; pages call
//! the `camply_api` clients directly and never share state with each other.

/// HTML escaping and banner helpers.
pub mod html;

/// The three client-visible routes.
mod routes;
pub use routes::*;

/// Navigation header.
mod header;
pub use header::*;

/// Document shell composing the header with exactly one page.
mod layout;
pub use layout::*;

/// Static landing page.
mod home_page;
pub use home_page::*;

/// Cascading recreation area / campground / campsite selection.
mod search_mode;
pub use search_mode::*;

/// Alert creation form.
mod notification_form;
pub use notification_form::*;

/// Alert list with test, pause/resume and delete actions.
mod notification_list;
pub use notification_list::*;

/// Delivery history of a single alert.
mod notification_history;
pub use notification_history::*;

/// In-memory API doubles.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
