use camply_api::{Notification, NotificationApi, NotificationHistory};
use log::error;

use crate::html::{banners, escape};
use crate::{Page, Route, format_date, location_description};

/// Banner shown when the alert or its history cannot be fetched.
pub const HISTORY_LOAD_FAILED: &str = "Failed to load alert history. Please try again.";

/// Delivery history of one alert
#[derive(Debug, Clone)]
pub struct NotificationHistoryPage {
    /// Alert id from the path
    pub id: i64,
    /// The alert, when it could be fetched
    pub notification: Option<Notification>,
    /// Delivery records, newest first as the backend orders them
    pub records: Vec<NotificationHistory>,
    /// Error banner
    pub error: Option<String>,
}

impl NotificationHistoryPage {
    /// Fetches the alert, then its history with the default limit.
    pub async fn load(api: &dyn NotificationApi, id: i64) -> Self {
        let mut page = Self {
            id,
            notification: None,
            records: Vec::new(),
            error: None,
        };

        let loaded = async {
            let notification = api.get(id).await?;
            let records = api.history(id, None).await?;
            Ok::<_, camply_api::ApiError>((notification, records))
        }
        .await;

        match loaded {
            Ok((notification, records)) => {
                page.notification = Some(notification);
                page.records = records;
            }
            Err(e) => {
                error!("❌ Failed to load history of alert {}: {}", id, e);
                page.error = Some(HISTORY_LOAD_FAILED.to_string());
            }
        }
        page
    }
}

fn render_record(record: &NotificationHistory) -> String {
    let status = if record.success {
        r#"<span class="badge badge-active">Sent</span>"#.to_string()
    } else {
        format!(
            r#"<span class="badge badge-paused">Failed</span> {}"#,
            escape(record.error_message.as_deref().unwrap_or(""))
        )
    };

    format!(
        "<tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        format_date(record.sent_at.date_naive()),
        record.sent_at.format("%H:%M"),
        escape(record.campsite_name.as_deref().unwrap_or("-")),
        escape(&record.message),
        status
    )
}

impl Page for NotificationHistoryPage {
    fn title(&self) -> String {
        "Alert History".to_string()
    }

    fn route(&self) -> Option<Route> {
        Some(Route::Notifications)
    }

    fn body(&self) -> String {
        let heading = self
            .notification
            .as_ref()
            .map(|n| {
                format!(
                    "<p><strong>{}</strong>, {} - {}</p>",
                    escape(&location_description(n)),
                    format_date(n.start_date),
                    format_date(n.end_date)
                )
            })
            .unwrap_or_default();

        let content = if self.error.is_some() {
            String::new()
        } else if self.records.is_empty() {
            "<p>No notifications have been sent for this alert yet.</p>".to_string()
        } else {
            let rows: String = self.records.iter().map(render_record).collect();
            format!(
                r#"<table class="history-table"><thead><tr><th>Sent</th><th>Campsite</th><th>Message</th><th>Status</th></tr></thead><tbody>{}</tbody></table>"#,
                rows
            )
        };

        format!(
            r#"<div class="card">
    <div class="card-header"><h1 class="card-title">Alert History</h1></div>
    {}
    {}
    {}
    <a href="{}" class="btn btn-secondary">Back to My Alerts</a>
</div>"#,
            banners(self.error.as_deref(), None),
            heading,
            content,
            Route::Notifications.path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, MockNotificationApi, Op, history_record, notification};

    #[tokio::test]
    async fn test_load_uses_default_limit() {
        let api = MockNotificationApi::with_notifications(vec![notification(1)])
            .with_history(vec![
                history_record(10, 1, true),
                history_record(11, 1, false),
                history_record(12, 2, true),
            ]);

        let page = NotificationHistoryPage::load(&api, 1).await;

        assert_eq!(api.calls(), vec![Call::Get(1), Call::History(1, None)]);
        assert_eq!(page.records.len(), 2);
        let body = page.body();
        assert!(body.contains("<td>06/02/2025 08:30</td>"));
        assert!(body.contains("Carrier rejected message"));
        assert!(body.contains(r#"<span class="badge badge-active">Sent</span>"#));
    }

    #[tokio::test]
    async fn test_empty_history() {
        let api = MockNotificationApi::with_notifications(vec![notification(1)]);

        let page = NotificationHistoryPage::load(&api, 1).await;

        assert!(page.body().contains("No notifications have been sent for this alert yet."));
    }

    #[tokio::test]
    async fn test_failure_sets_banner() {
        let api = MockNotificationApi::with_notifications(vec![notification(1)]);
        api.fail(Op::History);

        let page = NotificationHistoryPage::load(&api, 1).await;
        assert_eq!(page.error.as_deref(), Some(HISTORY_LOAD_FAILED));

        let missing = NotificationHistoryPage::load(&api, 5).await;
        assert_eq!(missing.error.as_deref(), Some(HISTORY_LOAD_FAILED));
        assert!(missing.notification.is_none());
    }
}
