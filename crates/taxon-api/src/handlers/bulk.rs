//! Bulk classification upload and template download.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;

use taxon_batch::{BatchInput, BatchRunner, BulkRow, TEMPLATE_CSV};

use crate::{ApiError, AppState};

/// Response: one entry per processed row, in upload order.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub rows: Vec<BulkRow>,
}

/// Classify every row of an uploaded CSV file.
///
/// Expects a multipart `file` field holding delimited text with a
/// `description`/`Description` column. Rows are processed strictly
/// sequentially; per-row failures are carried in the response, and only a
/// file with no usable rows fails the whole request.
pub async fn classify_bulk(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BulkResponse>, ApiError> {
    let mut file_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
            file_bytes = Some(bytes);
            break;
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| ApiError::BadRequest("missing 'file' field".to_string()))?;
    let input = BatchInput::from_bytes(&bytes)?;

    let runner = BatchRunner::new(state.adapter.clone());
    let rows = runner
        .run(&input, |pct| {
            info!(
                subsystem = "api",
                component = "bulk",
                progress = pct,
                "Batch progress"
            );
        })
        .await?;

    Ok(Json(BulkResponse { rows }))
}

/// Downloadable CSV template for preparing bulk input.
pub async fn template() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"template.csv\"",
            ),
        ],
        TEMPLATE_CSV,
    )
}
