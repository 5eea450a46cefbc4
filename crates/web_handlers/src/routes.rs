use actix_web::web;
use web_pages::Route;

use crate::*;

/// Registers every page route. The not-found fallback is registered on the `App`
/// with `default_service(web::to(not_found))`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let form = Route::CreateNotification.path();
    let list = Route::Notifications.path();

    cfg.route(Route::Home.path(), web::get().to(home))
        .route("/health", web::get().to(health))
        .route(form, web::get().to(new_notification_form))
        .route(form, web::post().to(create_notification))
        .route(&format!("{}/search", form), web::post().to(search_locations))
        .route(&format!("{}/mode", form), web::post().to(switch_search_mode))
        .route(&format!("{}/select", form), web::post().to(select_location))
        .route(list, web::get().to(list_notifications))
        .route(&format!("{}/{{id}}/delete", list), web::get().to(confirm_delete))
        .route(&format!("{}/{{id}}/delete", list), web::post().to(delete_notification))
        .route(&format!("{}/{{id}}/test", list), web::post().to(test_notification))
        .route(
            &format!("{}/{{id}}/active", list),
            web::post().to(set_notification_active),
        )
        .route(&format!("{}/{{id}}/history", list), web::get().to(notification_history));
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use camply_api::{NotificationUpdate, RecreationAreaSearch};
    use web_pages::testing::{
        Call, MockNotificationApi, MockSearchApi, Op, SearchCall, notification, search_result,
    };

    use super::*;

    const LIST_ALL: Call = Call::List { active_only: false };

    struct Backend {
        notifications: Arc<MockNotificationApi>,
        search: Arc<MockSearchApi>,
    }

    impl Backend {
        fn new(notifications: MockNotificationApi, search: MockSearchApi) -> Self {
            Self {
                notifications: Arc::new(notifications),
                search: Arc::new(search),
            }
        }

        fn clients(&self) -> web::Data<ApiClients> {
            web::Data::new(ApiClients::new(
                self.notifications.clone(),
                self.search.clone(),
            ))
        }
    }

    macro_rules! app {
        ($backend:expr) => {
            test::init_service(
                App::new()
                    .app_data($backend.clients())
                    .configure(configure_routes)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    async fn body_of(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_static_pages() {
        let backend = Backend::new(MockNotificationApi::new(), MockSearchApi::new());
        let app = app!(backend);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;
        assert!(body.contains("Welcome to Camply Web Interface"));
        assert!(body.contains(r#"<header class="site-header">"#));

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(body_of(resp).await, "OK");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/create-notification").to_request(),
        )
        .await;
        assert!(body_of(resp).await.contains("Create Campsite Alert"));

        assert!(backend.notifications.calls().is_empty());
        assert!(backend.search.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_paths_are_not_found() {
        let backend = Backend::new(MockNotificationApi::new(), MockSearchApi::new());
        let app = app!(backend);

        for uri in ["/create", "/notifications/extra", "/home"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
            assert!(body_of(resp).await.contains("Page Not Found"));
        }
    }

    #[actix_web::test]
    async fn test_search_round_trip() {
        let backend = Backend::new(
            MockNotificationApi::new(),
            MockSearchApi::new().with_recreation_areas(vec![search_result(2907, "Yosemite")]),
        );
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/create-notification/search")
            .set_form([
                ("mode", "recreation-area"),
                ("query", "yosemite"),
                ("start_date", "2025-07-01"),
                ("end_date", ""),
                ("phone_number", ""),
            ])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains(
            r#"formaction="/create-notification/select?id=2907&amp;name=Yosemite""#
        ));
        assert!(body.contains(r#"name="start_date" value="2025-07-01""#));
        assert_eq!(
            backend.search.calls(),
            vec![SearchCall::RecreationAreas(RecreationAreaSearch {
                query: Some("yosemite".to_string()),
                ..Default::default()
            })]
        );
    }

    #[actix_web::test]
    async fn test_select_and_mode_switch() {
        let backend = Backend::new(MockNotificationApi::new(), MockSearchApi::new());
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/create-notification/select?id=2907&name=Yosemite%20National%20Park")
            .set_form([("mode", "recreation-area"), ("query", "yose")])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains(r#"<input type="hidden" name="mode" value="campground">"#));
        assert!(body.contains(r#"<input type="hidden" name="recreation_area_id" value="2907">"#));
        assert!(body.contains("Search for campground..."));

        let req = test::TestRequest::post()
            .uri("/create-notification/mode?mode=campsite")
            .set_form([
                ("mode", "campground"),
                ("recreation_area_id", "2907"),
                ("recreation_area_name", "Yosemite National Park"),
            ])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains(r#"<input type="hidden" name="mode" value="campsite">"#));
        assert!(!body.contains(r#"name="recreation_area_id""#));

        assert!(backend.search.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_submit_creates_once_and_redirects() {
        let backend = Backend::new(MockNotificationApi::new(), MockSearchApi::new());
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/create-notification")
            .set_form([
                ("mode", "campsite"),
                ("start_date", "2025-07-01"),
                ("end_date", "2025-07-05"),
                ("phone_number", "+15551234567"),
                ("campground_id", "232447"),
                ("campground_name", "Pine Grove"),
            ])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains(r#"<meta http-equiv="refresh" content="2;url=/notifications">"#));
        assert!(body.contains("Notification created successfully!"));
        let calls = backend.notifications.calls();
        assert_eq!(calls.len(), 1);
        let Call::Create(data) = &calls[0] else {
            panic!("expected a create call");
        };
        assert_eq!(data.campground_id, Some(232447));
        assert_eq!(data.recreation_area_id, None);
    }

    #[actix_web::test]
    async fn test_submit_missing_fields_makes_no_call() {
        let backend = Backend::new(MockNotificationApi::new(), MockSearchApi::new());
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/create-notification")
            .set_form([("start_date", "2025-07-01"), ("end_date", ""), ("phone_number", "")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_of(resp).await;

        assert!(body.contains("Please fill in all required fields."));
        assert!(!body.contains("http-equiv"));
        assert!(backend.notifications.calls().is_empty());
    }

    #[actix_web::test]
    async fn test_list_and_delete_flow() {
        let backend = Backend::new(
            MockNotificationApi::with_notifications(vec![notification(1), notification(2)]),
            MockSearchApi::new(),
        );
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/notifications").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains(r#"href="/notifications/2/delete""#));

        let req = test::TestRequest::post()
            .uri("/notifications/1/delete")
            .set_form([("confirm", "no")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/notifications");
        assert_eq!(backend.notifications.calls(), vec![LIST_ALL]);

        let req = test::TestRequest::post()
            .uri("/notifications/1/delete")
            .set_form([("confirm", "yes")])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Alert deleted successfully."));
        assert_eq!(
            backend.notifications.calls(),
            vec![LIST_ALL, Call::Delete(1), LIST_ALL]
        );
        assert_eq!(backend.notifications.notifications().len(), 1);
    }

    #[actix_web::test]
    async fn test_delete_failure_still_lists() {
        let notifications = MockNotificationApi::with_notifications(vec![notification(1)]);
        notifications.fail(Op::Delete);
        let backend = Backend::new(notifications, MockSearchApi::new());
        let app = app!(backend);

        let req = test::TestRequest::post()
            .uri("/notifications/1/delete")
            .set_form([("confirm", "yes")])
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;

        assert!(body.contains("Failed to delete alert. Please try again."));
        assert!(body.contains(r#"action="/notifications/1/test""#));
        assert_eq!(
            backend.notifications.calls(),
            vec![Call::Delete(1), LIST_ALL]
        );
    }

    #[actix_web::test]
    async fn test_test_send_and_pause() {
        let backend = Backend::new(
            MockNotificationApi::with_notifications(vec![notification(1)]),
            MockSearchApi::new(),
        );
        let app = app!(backend);

        let req = test::TestRequest::post().uri("/notifications/1/test").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Test notification sent successfully!"));

        let req = test::TestRequest::post()
            .uri("/notifications/1/active?active=false")
            .to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Alert paused."));
        assert!(body.contains("Paused"));

        assert_eq!(
            backend.notifications.calls(),
            vec![
                LIST_ALL,
                Call::Test(1),
                Call::Update(1, NotificationUpdate::active(false)),
                LIST_ALL,
            ]
        );
    }

    #[actix_web::test]
    async fn test_history_and_confirmation_pages() {
        let backend = Backend::new(
            MockNotificationApi::with_notifications(vec![notification(1)]),
            MockSearchApi::new(),
        );
        let app = app!(backend);

        let req = test::TestRequest::get().uri("/notifications/1/history").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Alert History"));

        let req = test::TestRequest::get().uri("/notifications/1/delete").to_request();
        let body = body_of(test::call_service(&app, req).await).await;
        assert!(body.contains("Are you sure you want to delete this alert?"));

        assert_eq!(
            backend.notifications.calls(),
            vec![Call::Get(1), Call::History(1, None), Call::Get(1)]
        );
    }
}
