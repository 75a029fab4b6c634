//! Single-query classification handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use taxon_core::{CategoryHint, ClassificationResult, HistoryItem, HistoryStore};

use crate::{ApiError, AppState};

/// Request body for a single classification query.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub description: String,
    /// Defaults to auto-detect when omitted.
    #[serde(default)]
    pub category: CategoryHint,
}

/// Response: the full candidate sequence in model order.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub results: Vec<ClassificationResult>,
}

/// Classify one free-text description.
///
/// Blank input is rejected here, before any remote call; a successful
/// classification records a history item. This is the only writer of the
/// history log.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    let description = request.description.trim().to_string();
    if description.is_empty() {
        return Err(ApiError::BadRequest(
            "description must not be blank".to_string(),
        ));
    }

    let results = state.adapter.classify(&description, request.category).await?;

    // A full history slot must not turn a successful classification into an
    // error; the result still reaches the caller.
    let item = HistoryItem::new(description, request.category);
    if let Err(e) = state.history.record(item).await {
        warn!(error = %e, "Failed to record history item");
    }

    Ok(Json(ClassifyResponse { results }))
}
