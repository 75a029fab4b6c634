//! History log handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use taxon_core::{HistoryItem, HistoryStore};

use crate::{ApiError, AppState};

/// Read the history log, most-recent first.
pub async fn read_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryItem>>, ApiError> {
    let items = state.history.read().await?;
    Ok(Json(items))
}

/// Reset the history log to an empty sequence.
pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
