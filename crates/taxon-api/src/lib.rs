//! taxon-api - HTTP API surface for the taxon classification service.
//!
//! Exposes the classification adapter, batch runner, history log, and export
//! renderers as a JSON API. All state lives in [`AppState`]; errors flow
//! through [`ApiError`] into `{"error": message}` responses.

pub mod handlers;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use taxon_core::{Error, HistoryStore};
use taxon_inference::ClassificationAdapter;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub adapter: ClassificationAdapter,
    pub history: Arc<dyn HistoryStore>,
}

/// HTTP-facing error, mapped from the core error taxonomy.
///
/// Input errors are the caller's fault (400); upstream classification
/// failures surface the remote problem (502); everything else is internal.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            Error::Classification(_) | Error::Request(_) | Error::Format(_) => {
                ApiError::Upstream(err.to_string())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Build the application router over `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(handlers::health::health))
        .route("/api/v1/classify", post(handlers::classify::classify))
        .route("/api/v1/classify/bulk", post(handlers::bulk::classify_bulk))
        .route("/api/v1/classify/template", get(handlers::bulk::template))
        .route(
            "/api/v1/history",
            get(handlers::history::read_history).delete(handlers::history::clear_history),
        )
        .route("/api/v1/export/pdf", post(handlers::export::export_pdf))
        .route("/api/v1/export/xlsx", post(handlers::export::export_xlsx))
        .with_state(state)
}
