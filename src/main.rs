//! ssr-scene-client entry point.
//!
//! Connects to the SSR, mirrors its scene, and serves the local API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use ssr_scene_client::api;
use ssr_scene_client::app_state::AppState;
use ssr_scene_client::config::ClientConfig;
use ssr_scene_client::domain::EventBus;
use ssr_scene_client::protocol::Notifier;
use ssr_scene_client::service::SceneService;
use ssr_scene_client::transport::run_link;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ClientConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let ssr_url = config.resolve_ssr_url().await;
    tracing::info!(%ssr_url, addr = %config.listen_addr, "starting ssr-scene-client");

    // Build domain + service layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let (notifier, outbound_rx) = Notifier::channel();
    let scene_service = Arc::new(SceneService::new(event_bus, notifier));

    // Start SSR link
    let link_service = Arc::clone(&scene_service);
    let topics = config.subscriptions.clone();
    tokio::spawn(async move {
        match run_link(&ssr_url, &topics, link_service, outbound_rx).await {
            Ok(()) => tracing::info!("SSR link closed"),
            Err(err) => tracing::error!(error = %err, "SSR link terminated"),
        }
    });

    // Build router
    let app = api::build_app(AppState::new(scene_service));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "local API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
