use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{parse_json, send};
use crate::{
    ApiConfig, ApiError, Notification, NotificationData, NotificationHistory, NotificationUpdate,
};

/// Number of history records requested when the caller does not pick a limit.
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Operations on the current user's alert subscriptions
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Creates an alert.
    async fn create(&self, data: &NotificationData) -> Result<Notification, ApiError>;

    /// Lists the current user's alerts. With `active_only` paused alerts are left out,
    /// which is also what the backend does when the parameter is missing.
    async fn list(&self, active_only: bool) -> Result<Vec<Notification>, ApiError>;

    /// Fetches one alert.
    async fn get(&self, id: i64) -> Result<Notification, ApiError>;

    /// Updates the fields present in `changes`; the backend keeps the rest.
    async fn update(&self, id: i64, changes: &NotificationUpdate)
    -> Result<Notification, ApiError>;

    /// Deletes an alert.
    async fn delete(&self, id: i64) -> Result<(), ApiError>;

    /// Asks the backend to send a test SMS for an alert.
    async fn test(&self, id: i64) -> Result<(), ApiError>;

    /// Delivery history of an alert, at most `limit` records (default 50).
    async fn history(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<NotificationHistory>, ApiError>;
}

/// HTTP client for the `/api/notifications` endpoints
#[derive(Debug, Clone)]
pub struct NotificationClient {
    client: Client,
    config: ApiConfig,
}

impl NotificationClient {
    /// Creates a client that reuses an existing HTTP client (and its session cookies).
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Creates a client with its own HTTP client.
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let client = config.build_http_client()?;
        Ok(Self::new(client, config))
    }

    fn item_url(&self, id: i64) -> String {
        self.config.url(&format!("/api/notifications/{}", id))
    }
}

#[async_trait]
impl NotificationApi for NotificationClient {
    async fn create(&self, data: &NotificationData) -> Result<Notification, ApiError> {
        let url = self.config.url("/api/notifications/");
        debug!(
            "Creating notification for {} to {}",
            data.start_date, data.end_date
        );

        let response = send(self.client.post(&url).json(data)).await?;
        parse_json(response).await
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Notification>, ApiError> {
        let url = self.config.url("/api/notifications/");
        debug!("Listing notifications (active_only={})", active_only);

        let params = [("active_only", active_only.to_string())];
        let response = send(self.client.get(&url).query(&params)).await?;
        parse_json(response).await
    }

    async fn get(&self, id: i64) -> Result<Notification, ApiError> {
        debug!("Fetching notification {}", id);

        let response = send(self.client.get(self.item_url(id))).await?;
        parse_json(response).await
    }

    async fn update(
        &self,
        id: i64,
        changes: &NotificationUpdate,
    ) -> Result<Notification, ApiError> {
        debug!("Updating notification {}", id);

        let response = send(self.client.put(self.item_url(id)).json(changes)).await?;
        parse_json(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        debug!("Deleting notification {}", id);

        send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }

    async fn test(&self, id: i64) -> Result<(), ApiError> {
        let url = format!("{}/test", self.item_url(id));
        debug!("Triggering test send for notification {}", id);

        send(self.client.post(&url)).await?;
        Ok(())
    }

    async fn history(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<NotificationHistory>, ApiError> {
        let url = format!("{}/history", self.item_url(id));
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        debug!("Fetching up to {} history records for notification {}", limit, id);

        let params = vec![("limit", limit.to_string())];
        let response = send(self.client.get(&url).query(&params)).await?;
        parse_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NotificationClient {
        NotificationClient::from_config(ApiConfig::new(&server.uri()).unwrap()).unwrap()
    }

    fn notification_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": 1,
            "campsite_id": 77,
            "campsite_name": "Site 12",
            "campground_id": 232447,
            "campground_name": "Pine Grove",
            "start_date": "2025-07-01",
            "end_date": "2025-07-04",
            "phone_number": "+15551234567",
            "is_active": true,
            "created_at": "2025-06-01T10:30:00"
        })
    }

    #[tokio::test]
    async fn test_create_sends_only_set_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/notifications/"))
            .and(body_json(json!({
                "campground_id": 232447,
                "campground_name": "Pine Grove",
                "start_date": "2025-07-01",
                "end_date": "2025-07-04",
                "phone_number": "+15551234567"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(notification_json(5)))
            .expect(1)
            .mount(&server)
            .await;

        let data = NotificationData {
            recreation_area_id: None,
            recreation_area_name: None,
            campground_id: Some(232447),
            campground_name: Some("Pine Grove".to_string()),
            campsite_id: None,
            campsite_name: None,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            phone_number: "+15551234567".to_string(),
        };

        let created = client_for(&server).create(&data).await.unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(created.campsite_name.as_deref(), Some("Site 12"));
    }

    #[tokio::test]
    async fn test_create_rejection_keeps_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/notifications/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Error creating notification: invalid phone number"
            })))
            .mount(&server)
            .await;

        let data = NotificationData {
            recreation_area_id: None,
            recreation_area_name: None,
            campground_id: None,
            campground_name: None,
            campsite_id: None,
            campsite_name: None,
            start_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 4).unwrap(),
            phone_number: "nope".to_string(),
        };

        let err = client_for(&server).create(&data).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { status: 400, .. }));
        assert_eq!(
            err.detail(),
            Some("Error creating notification: invalid phone number")
        );
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([notification_json(1), notification_json(2)])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(notification_json(2)))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let all = client.list(false).await.unwrap();
        assert_eq!(all.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(client.get(2).await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_list_sends_active_only_flag() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .and(query_param("active_only", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([notification_json(1)])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .and(query_param("active_only", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(client.list(false).await.unwrap().len(), 1);
        assert!(client.list(true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/404"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"detail": "Notification not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get(404).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_update_delete_and_test_send() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/notifications/3"))
            .and(body_json(json!({ "is_active": false })))
            .respond_with(ResponseTemplate::new(200).set_body_json(notification_json(3)))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/notifications/3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Notification deleted successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/notifications/3/test"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"message": "Test notification sent successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .update(3, &NotificationUpdate::active(false))
            .await
            .unwrap();
        client.delete(3).await.unwrap();
        client.test(3).await.unwrap();
    }

    #[tokio::test]
    async fn test_history_defaults_to_fifty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/7/history"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1,
                "user_id": 1,
                "preference_id": 7,
                "notification_type": "sms",
                "message": "Campsite available",
                "success": true,
                "sent_at": "2025-06-03T12:00:00"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/7/history"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let history = client.history(7, None).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].preference_id, Some(7));
        assert!(client.history(7, Some(5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_server_error_and_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "detail": "Error retrieving notifications: database is locked"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).list(true).await.unwrap_err();
        assert!(matches!(err, ApiError::Server { status: 500, .. }));

        let closed_uri = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}", listener.local_addr().unwrap())
        };
        let client =
            NotificationClient::from_config(ApiConfig::new(&closed_uri).unwrap()).unwrap();
        assert!(matches!(
            client.list(false).await.unwrap_err(),
            ApiError::Network(_)
        ));
    }

    #[tokio::test]
    async fn test_unexpected_body_is_data_format_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/notifications/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        assert!(matches!(
            client_for(&server).list(true).await.unwrap_err(),
            ApiError::DataFormat(_)
        ));
    }
}
