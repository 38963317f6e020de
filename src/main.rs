// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_composer::ComposeOptions;
use crate::application::dashboard_service::DashboardService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::domain::filter::TopN;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_sales_repository::HttpSalesRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_json, dashboard_page_handler, health_check, list_salespeople, stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_config().context("Failed to load config/dashboard.toml")?;
    let default_top_n = TopN::new(config.dashboard.default_top_n)
        .context("dashboard.default_top_n is out of range")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpSalesRepository::new(
        config.source.base_url.clone(),
        config.source.timeout_secs.map(Duration::from_secs),
    )?);

    // Create services (application layer)
    let options = ComposeOptions {
        title: config.dashboard.title.clone(),
        currency_prefix: config.dashboard.currency_prefix.clone(),
    };
    let dashboard_service = DashboardService::new(repository, options, default_top_n);
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(dashboard_page_handler))
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(dashboard_json))
        .route("/api/dashboard/stream", get(stream_dashboard))
        .route("/api/salespeople", get(list_salespeople))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid server.bind_addr '{}'", config.server.bind_addr))?;
    tracing::info!(source = %config.source.base_url, "Starting sales-dashboard on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
