//! Main entry point for the Camply web front-end.
//! Renders the alert pages and proxies every action to the Camply backend.

use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use camply_api::{NotificationClient, SearchApi, SearchClient};
use web_handlers::{ApiClients, configure_routes, not_found};

mod config;
use config::ServerConfig;

/// Logs the providers the backend aggregates. Startup continues if the backend is down.
async fn probe_backend(search: &dyn SearchApi) {
    match search.providers().await {
        Ok(providers) => {
            log::info!("🏕️ Backend reachable, providers: {}", providers.join(", "));
        }
        Err(e) => {
            log::error!("❌ Backend connection test failed: {}", e);
            log::warn!("💡 Check CAMPLY_API_URL; pages will show errors until the backend is up");
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting Camply web interface...");

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Both clients share one HTTP client so they share the session cookie
    let http_client = match config.api.build_http_client() {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to create HTTP client: {}", e);
            std::process::exit(1);
        }
    };
    let notifications = Arc::new(NotificationClient::new(
        http_client.clone(),
        config.api.clone(),
    ));
    let search = Arc::new(SearchClient::new(http_client, config.api.clone()));

    log::info!("🔗 Camply backend: {}", config.api.base_url());
    probe_backend(search.as_ref()).await;

    let clients = web::Data::new(ApiClients::new(notifications, search));
    let static_dir = config.static_dir.clone();
    if let Some(dir) = &static_dir {
        log::info!("📁 Static files location: {}", dir.display());
    }
    log::info!("🌐 Server will be available at: http://{}", config.bind_addr);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(clients.clone())
            .wrap(Logger::default())
            .configure(configure_routes);

        let app = match &static_dir {
            Some(dir) => app.service(Files::new("/static", dir)),
            None => app,
        };

        app.default_service(web::to(not_found))
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
