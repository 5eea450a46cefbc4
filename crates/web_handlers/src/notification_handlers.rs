use actix_web::http::header;
use actix_web::{HttpResponse, Result, web};
use serde::Deserialize;
use web_pages::{
    DeleteConfirmation, DeleteOutcome, NotificationHistoryPage, NotificationList, Route,
};

use crate::{ApiClients, render_page};

/// Body of the delete confirmation form
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    /// `yes` when the user confirmed
    #[serde(default)]
    pub confirm: String,
}

/// Query of the pause/resume buttons
#[derive(Debug, Deserialize)]
pub struct ActiveQuery {
    /// `false` pauses, `true` resumes
    pub active: bool,
}

/// Lists the current user's alerts.
pub async fn list_notifications(clients: web::Data<ApiClients>) -> Result<HttpResponse> {
    let page = NotificationList::mount(clients.notifications.as_ref()).await;
    Ok(render_page(&page))
}

/// Asks for confirmation before deleting an alert.
pub async fn confirm_delete(
    clients: web::Data<ApiClients>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let page = DeleteConfirmation::load(clients.notifications.as_ref(), path.into_inner()).await;
    Ok(render_page(&page))
}

/// Deletes an alert if the confirmation form says so, otherwise goes back to the list.
pub async fn delete_notification(
    clients: web::Data<ApiClients>,
    path: web::Path<i64>,
    form: web::Form<DeleteForm>,
) -> Result<HttpResponse> {
    let id = path.into_inner();
    let api = clients.notifications.as_ref();
    let confirmed = form.confirm == "yes";

    let mut page = NotificationList::default();
    match page.delete(api, id, |_| confirmed).await {
        DeleteOutcome::Cancelled => {
            return Ok(HttpResponse::SeeOther()
                .insert_header((header::LOCATION, Route::Notifications.path()))
                .finish());
        }
        DeleteOutcome::Deleted => {}
        DeleteOutcome::Failed => page.load(api).await,
    }

    Ok(render_page(&page))
}

/// Sends a test SMS for an alert and shows the list.
pub async fn test_notification(
    clients: web::Data<ApiClients>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let api = clients.notifications.as_ref();
    let mut page = NotificationList::mount(api).await;
    page.send_test(api, path.into_inner()).await;

    Ok(render_page(&page))
}

/// Pauses or resumes an alert.
pub async fn set_notification_active(
    clients: web::Data<ApiClients>,
    path: web::Path<i64>,
    query: web::Query<ActiveQuery>,
) -> Result<HttpResponse> {
    let api = clients.notifications.as_ref();
    let mut page = NotificationList::default();
    page.set_active(api, path.into_inner(), query.active).await;
    if page.error.is_some() {
        page.load(api).await;
    }

    Ok(render_page(&page))
}

/// Shows the delivery history of an alert.
pub async fn notification_history(
    clients: web::Data<ApiClients>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let page =
        NotificationHistoryPage::load(clients.notifications.as_ref(), path.into_inner()).await;
    Ok(render_page(&page))
}
