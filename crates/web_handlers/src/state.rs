use std::sync::Arc;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use camply_api::{NotificationApi, SearchApi};
use web_pages::{Page, render_document};

/// Backend clients, shared read-only by every worker
#[derive(Clone)]
pub struct ApiClients {
    /// Notification endpoints
    pub notifications: Arc<dyn NotificationApi>,
    /// Search endpoints
    pub search: Arc<dyn SearchApi>,
}

impl ApiClients {
    /// Bundles the two clients.
    pub fn new(notifications: Arc<dyn NotificationApi>, search: Arc<dyn SearchApi>) -> Self {
        Self {
            notifications,
            search,
        }
    }
}

/// Renders `page` inside the document shell with status 200.
pub fn render_page(page: &dyn Page) -> HttpResponse {
    render_page_with_status(StatusCode::OK, page)
}

/// Renders `page` inside the document shell.
pub fn render_page_with_status(status: StatusCode, page: &dyn Page) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(render_document(page))
}
