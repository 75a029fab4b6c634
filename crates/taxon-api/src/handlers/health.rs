//! Health handler: service liveness plus upstream reachability.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use taxon_core::GenerationBackend;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Model serving classification requests.
    pub model: String,
    /// Whether the generation backend answered its health probe.
    pub upstream: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.adapter.backend();
    let upstream = backend.health_check().await.unwrap_or(false);
    Json(HealthResponse {
        status: "ok",
        model: backend.model_name().to_string(),
        upstream,
    })
}
