use actix_web::{HttpResponse, Result, web};
use camply_api::SearchResult;
use serde::Deserialize;
use web_pages::{FormSnapshot, NotificationForm, SearchMode};

use crate::{ApiClients, render_page};

/// Query of the mode switch buttons
#[derive(Debug, Deserialize)]
pub struct ModeQuery {
    /// Mode to switch to
    pub mode: SearchMode,
}

/// Query of a result's select button
#[derive(Debug, Deserialize)]
pub struct SelectQuery {
    /// Result id
    pub id: i64,
    /// Result name
    pub name: String,
    /// Result description
    pub description: Option<String>,
}

/// Serves an empty alert form.
pub async fn new_notification_form() -> Result<HttpResponse> {
    Ok(render_page(&NotificationForm::default()))
}

/// Runs the location search for the submitted query.
pub async fn search_locations(
    clients: web::Data<ApiClients>,
    form: web::Form<FormSnapshot>,
) -> Result<HttpResponse> {
    let snapshot = form.into_inner();
    let query = snapshot.query.clone();

    let mut page = NotificationForm::from_snapshot(snapshot);
    page.search(clients.search.as_ref(), &query).await;

    Ok(render_page(&page))
}

/// Switches the search mode.
pub async fn switch_search_mode(
    query: web::Query<ModeQuery>,
    form: web::Form<FormSnapshot>,
) -> Result<HttpResponse> {
    let mut page = NotificationForm::from_snapshot(form.into_inner());
    page.switch_mode(query.mode);

    Ok(render_page(&page))
}

/// Selects one search result.
pub async fn select_location(
    query: web::Query<SelectQuery>,
    form: web::Form<FormSnapshot>,
) -> Result<HttpResponse> {
    let SelectQuery {
        id,
        name,
        description,
    } = query.into_inner();

    let mut page = NotificationForm::from_snapshot(form.into_inner());
    page.select_result(SearchResult {
        id,
        name,
        description,
        location: None,
    });

    Ok(render_page(&page))
}

/// Submits the form. Success renders the confirmation with a delayed redirect to
/// the alert list; failure re-renders the form with its banner.
pub async fn create_notification(
    clients: web::Data<ApiClients>,
    form: web::Form<FormSnapshot>,
) -> Result<HttpResponse> {
    let mut page = NotificationForm::from_snapshot(form.into_inner());
    if let Err(e) = page.submit(clients.notifications.as_ref()).await {
        log::warn!("Alert submission rejected: {}", e);
    }

    Ok(render_page(&page))
}
