// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod test_support;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::dataset_service::DatasetService;
use crate::application::dataset_source::DatasetSource;
use crate::application::streaming_service::StreamingDashboardService;
use crate::infrastructure::config::{load_app_config, DatasetSettings};
use crate::infrastructure::csv_dataset::{FileCsvSource, HttpCsvSource};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dataset_status, export_records, filter_options, get_dashboard, health_check, list_records,
    stream_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create dataset source (infrastructure layer)
    let source = build_source(&config.dataset)?;
    tracing::info!("Salary dataset source: {}", source.describe());

    // Create services (application layer)
    let datasets = DatasetService::new(source, config.dataset.cache_ttl_secs);
    let dashboard_service = DashboardService::new(datasets.clone(), config.dashboard.clone());
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone());

    // Warm the cache; a failure here is logged and retried on the first request
    if let Err(e) = datasets.current().await {
        tracing::warn!("Initial dataset load failed: {}", e);
    }

    let state = Arc::new(AppState {
        dashboard_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // JSON bodies are compressed in the response builders, so no CompressionLayer
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dataset", get(dataset_status))
        .route("/filters", get(filter_options))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/records", get(list_records))
        .route("/records.csv", get(export_records))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind))?;
    tracing::info!("Starting salary-dashboard service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}

fn build_source(settings: &DatasetSettings) -> anyhow::Result<Arc<dyn DatasetSource>> {
    match &settings.path {
        Some(path) => Ok(Arc::new(FileCsvSource::new(path.clone()))),
        None => {
            let timeout = Duration::from_secs(settings.request_timeout_secs);
            Ok(Arc::new(HttpCsvSource::new(settings.url.clone(), timeout)?))
        }
    }
}
