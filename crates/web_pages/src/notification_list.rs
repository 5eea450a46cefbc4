use camply_api::{Notification, NotificationApi, NotificationUpdate};
use chrono::NaiveDate;
use log::{error, info, warn};

use crate::html::{banners, escape, hidden_input};
use crate::{Page, Route};

/// Banner shown when the list cannot be fetched.
pub const LOAD_FAILED: &str = "Failed to load notifications. Please try again.";
/// Question asked before deleting an alert.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this alert?";
/// Banner shown after a delete.
pub const DELETE_SUCCEEDED: &str = "Alert deleted successfully.";
/// Banner shown when a delete fails.
pub const DELETE_FAILED: &str = "Failed to delete alert. Please try again.";
/// Banner shown after a test send.
pub const TEST_SUCCEEDED: &str = "Test notification sent successfully!";
/// Banner shown when a test send fails.
pub const TEST_FAILED: &str = "Failed to send test notification. Please try again.";
/// Banner shown after pausing an alert.
pub const ALERT_PAUSED: &str = "Alert paused.";
/// Banner shown after resuming an alert.
pub const ALERT_RESUMED: &str = "Alert resumed.";
/// Banner shown when pausing or resuming fails.
pub const UPDATE_FAILED: &str = "Failed to update alert. Please try again.";
/// Description of an alert with no location.
pub const ANY_LOCATION: &str = "Any available location";

/// What happened to a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user did not confirm; nothing was sent
    Cancelled,
    /// Deleted and the list re-fetched
    Deleted,
    /// The backend call failed
    Failed,
}

/// The current user's alerts
#[derive(Debug, Clone, Default)]
pub struct NotificationList {
    /// Alerts in backend order
    pub notifications: Vec<Notification>,
    /// A list fetch is in flight
    pub loading: bool,
    /// Error banner
    pub error: Option<String>,
    /// Success banner
    pub success: Option<String>,
}

impl NotificationList {
    /// Mounts the page: exactly one list fetch.
    pub async fn mount(api: &dyn NotificationApi) -> Self {
        let mut list = Self::default();
        list.load(api).await;
        list
    }

    /// Fetches every alert, paused ones included, so they can be resumed.
    /// Banners from earlier actions are kept.
    pub async fn load(&mut self, api: &dyn NotificationApi) {
        self.loading = true;
        match api.list(false).await {
            Ok(notifications) => {
                info!("📋 Loaded {} alerts", notifications.len());
                self.notifications = notifications;
            }
            Err(e) => {
                error!("❌ Failed to load alerts: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
        self.loading = false;
    }

    /// Deletes an alert once `confirm` approves the question. A successful delete is
    /// followed by one list fetch.
    pub async fn delete(
        &mut self,
        api: &dyn NotificationApi,
        id: i64,
        confirm: impl FnOnce(&str) -> bool,
    ) -> DeleteOutcome {
        if !confirm(DELETE_CONFIRMATION) {
            return DeleteOutcome::Cancelled;
        }

        match api.delete(id).await {
            Ok(()) => {
                info!("🗑️ Deleted alert {}", id);
                self.success = Some(DELETE_SUCCEEDED.to_string());
                self.load(api).await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                error!("❌ Failed to delete alert {}: {}", id, e);
                self.error = Some(DELETE_FAILED.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    /// Asks the backend for a test SMS. The list is left as it is.
    pub async fn send_test(&mut self, api: &dyn NotificationApi, id: i64) {
        match api.test(id).await {
            Ok(()) => {
                info!("📱 Test notification sent for alert {}", id);
                self.success = Some(TEST_SUCCEEDED.to_string());
            }
            Err(e) => {
                error!("❌ Failed to send test notification for alert {}: {}", id, e);
                self.error = Some(TEST_FAILED.to_string());
            }
        }
    }

    /// Pauses or resumes an alert, then re-fetches the list.
    pub async fn set_active(&mut self, api: &dyn NotificationApi, id: i64, active: bool) {
        match api.update(id, &NotificationUpdate::active(active)).await {
            Ok(_) => {
                let (state, banner) = if active {
                    ("active", ALERT_RESUMED)
                } else {
                    ("paused", ALERT_PAUSED)
                };
                info!("Alert {} is now {}", id, state);
                self.success = Some(banner.to_string());
                self.load(api).await;
            }
            Err(e) => {
                warn!("Failed to update alert {}: {}", id, e);
                self.error = Some(UPDATE_FAILED.to_string());
            }
        }
    }
}

/// Most specific location of an alert, for display.
pub fn location_description(notification: &Notification) -> String {
    if let Some(campsite) = &notification.campsite_name {
        return match &notification.campground_name {
            Some(campground) => format!("{} in {}", campsite, campground),
            None => campsite.clone(),
        };
    }
    if let Some(campground) = &notification.campground_name {
        return campground.clone();
    }
    if let Some(recreation_area) = &notification.recreation_area_name {
        return recreation_area.clone();
    }
    ANY_LOCATION.to_string()
}

/// `MM/DD/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn render_card(notification: &Notification) -> String {
    let id = notification.id;
    let (status_class, status, toggle_label) = if notification.is_active {
        ("badge badge-active", "Active", "Pause")
    } else {
        ("badge badge-paused", "Paused", "Resume")
    };

    format!(
        r#"<div class="card notification-card">
    <div class="card-header">
        <h3 class="card-title">{location}</h3>
        <span class="{status_class}">{status}</span>
    </div>
    <p><strong>Dates:</strong> {start} - {end}</p>
    <p><strong>Phone:</strong> {phone}</p>
    <p class="muted">Created {created}</p>
    <div class="actions">
        <form method="post" action="/notifications/{id}/test"><button type="submit" class="btn btn-secondary">Test</button></form>
        <form method="post" action="/notifications/{id}/active?active={next}"><button type="submit" class="btn btn-secondary">{toggle}</button></form>
        <a href="/notifications/{id}/history" class="btn btn-secondary">History</a>
        <a href="/notifications/{id}/delete" class="btn btn-danger">Delete</a>
    </div>
</div>"#,
        location = escape(&location_description(notification)),
        status_class = status_class,
        status = status,
        start = format_date(notification.start_date),
        end = format_date(notification.end_date),
        phone = escape(&notification.phone_number),
        created = format_date(notification.created_at.date_naive()),
        id = id,
        next = !notification.is_active,
        toggle = toggle_label,
    )
}

impl Page for NotificationList {
    fn title(&self) -> String {
        "My Alerts".to_string()
    }

    fn route(&self) -> Option<Route> {
        Some(Route::Notifications)
    }

    fn body(&self) -> String {
        let content = if self.loading {
            r#"<div class="loading">Loading your alerts...</div>"#.to_string()
        } else if self.notifications.is_empty() {
            format!(
                r#"<div class="card empty-state"><p>You don't have any alerts yet.</p><a href="{}" class="btn btn-primary">Create your first alert</a></div>"#,
                Route::CreateNotification.path()
            )
        } else {
            self.notifications.iter().map(render_card).collect()
        };

        format!(
            r#"<div class="page-header"><h1>My Campsite Alerts</h1><a href="{}" class="btn btn-primary">Create New Alert</a></div>
{}
{}"#,
            Route::CreateNotification.path(),
            banners(self.error.as_deref(), self.success.as_deref()),
            content
        )
    }
}

/// Confirmation step shown before an alert is deleted
#[derive(Debug, Clone)]
pub struct DeleteConfirmation {
    /// Alert to delete
    pub id: i64,
    /// The alert, when it could be fetched
    pub notification: Option<Notification>,
    /// Error banner
    pub error: Option<String>,
}

impl DeleteConfirmation {
    /// Fetches the alert so the question can name its location.
    pub async fn load(api: &dyn NotificationApi, id: i64) -> Self {
        match api.get(id).await {
            Ok(notification) => Self {
                id,
                notification: Some(notification),
                error: None,
            },
            Err(e) => {
                error!("❌ Failed to load alert {}: {}", id, e);
                Self {
                    id,
                    notification: None,
                    error: Some(LOAD_FAILED.to_string()),
                }
            }
        }
    }
}

impl Page for DeleteConfirmation {
    fn title(&self) -> String {
        "Delete Alert".to_string()
    }

    fn route(&self) -> Option<Route> {
        Some(Route::Notifications)
    }

    fn body(&self) -> String {
        let list = Route::Notifications.path();
        let Some(notification) = &self.notification else {
            return format!(
                r#"{}<a href="{}" class="btn btn-secondary">Back to My Alerts</a>"#,
                banners(self.error.as_deref(), None),
                list
            );
        };

        format!(
            r#"<div class="card">
    <div class="card-header"><h1 class="card-title">Delete Alert</h1></div>
    <p>{question}</p>
    <p><strong>{location}</strong>, {start} - {end}</p>
    <form method="post" action="{list}/{id}/delete">
        {confirm}
        <button type="submit" class="btn btn-danger">Delete</button>
        <a href="{list}" class="btn btn-secondary">Cancel</a>
    </form>
</div>"#,
            question = DELETE_CONFIRMATION,
            location = escape(&location_description(notification)),
            start = format_date(notification.start_date),
            end = format_date(notification.end_date),
            list = list,
            id = self.id,
            confirm = hidden_input("confirm", "yes"),
        )
    }
}
