use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result};
use web_pages::{HomePage, NotFoundPage};

use crate::{render_page, render_page_with_status};

/// Serves the landing page.
pub async fn home() -> Result<HttpResponse> {
    Ok(render_page(&HomePage))
}

/// Liveness probe.
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().body("OK"))
}

/// Fallback for every path outside the route table.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse> {
    log::debug!("No route for {} {}", req.method(), req.path());
    let page = NotFoundPage {
        path: req.path().to_string(),
    };
    Ok(render_page_with_status(StatusCode::NOT_FOUND, &page))
}
