// Mapping of dashboard errors to HTTP responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::errors::DashboardError;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        if self.is_load_failure() {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        match self {
            DashboardError::InvalidFilter { .. } | DashboardError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
