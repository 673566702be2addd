// HTTP request handlers
use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::errors::DashboardError;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, bytes_response, json_response, CSV_CONTENT_TYPE};
use crate::presentation::app_state::AppState;
use crate::presentation::query::parse_dashboard_query;

#[derive(Debug, Serialize)]
pub struct DatasetStatus {
    pub source: String,
    pub rows: usize,
    pub loaded_at: DateTime<Utc>,
}

fn respond(result: Result<Response, StatusCode>) -> Response {
    result.unwrap_or_else(IntoResponse::into_response)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Where the dataset came from and how big it is (loads it if needed)
pub async fn dataset_status(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let dataset = state.dashboard_service.datasets().current().await?;
    let status = DatasetStatus {
        source: dataset.source().to_string(),
        rows: dataset.len(),
        loaded_at: dataset.loaded_at(),
    };
    Ok(respond(json_response(&status, accepts_brotli(&headers)).await))
}

/// Available values for each filter
pub async fn filter_options(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let options = state.dashboard_service.filter_options().await?;
    Ok(respond(json_response(&options, accepts_brotli(&headers)).await))
}

/// Full dashboard for the selection in the query string
pub async fn get_dashboard(
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let query = parse_dashboard_query(raw.as_deref())?;
    let page = state.dashboard_service.page(query.offset, query.limit)?;

    let dashboard = state.dashboard_service.get_dashboard(&query.selection, page).await?;
    Ok(respond(json_response(&dashboard, accepts_brotli(&headers)).await))
}

/// Stream the dashboard panel by panel (progressive loading)
pub async fn stream_dashboard(
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let query = parse_dashboard_query(raw.as_deref())?;
    let page = state.dashboard_service.page(query.offset, query.limit)?;

    let rx = state.streaming_service.stream_dashboard(query.selection, page).await;
    Ok(stream_from_receiver(rx, accepts_brotli(&headers)).await.into_response())
}

/// One page of the filtered detail table
pub async fn list_records(
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let query = parse_dashboard_query(raw.as_deref())?;
    let page = state.dashboard_service.page(query.offset, query.limit)?;

    let records = state.dashboard_service.records(&query.selection, page).await?;
    Ok(respond(json_response(&records, accepts_brotli(&headers)).await))
}

/// Every filtered row as a CSV download
pub async fn export_records(
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Result<Response, DashboardError> {
    let query = parse_dashboard_query(raw.as_deref())?;
    let csv = state.dashboard_service.export_records(&query.selection).await?;

    let mut response = respond(bytes_response(csv, CSV_CONTENT_TYPE, accepts_brotli(&headers)).await);
    response.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"salaries.csv\""),
    );
    Ok(response)
}
