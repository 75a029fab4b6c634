//! Export handlers: render a result sequence as a downloadable file.
//!
//! Both are pure transformations of the posted sequence; nothing is stored.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use taxon_core::ClassificationResult;
use taxon_export::{render_pdf, render_xlsx};

use crate::ApiError;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Render the posted results as a PDF table.
pub async fn export_pdf(
    Json(results): Json<Vec<ClassificationResult>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = render_pdf(&results)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"hsn-sac-results.pdf\"",
            ),
        ],
        bytes,
    ))
}

/// Render the posted results as an XLSX workbook.
pub async fn export_xlsx(
    Json(results): Json<Vec<ClassificationResult>>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = render_xlsx(&results)?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"hsn-sac-results.xlsx\"",
            ),
        ],
        bytes,
    ))
}
