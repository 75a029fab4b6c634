//! # taxon-export
//!
//! File exports of classification result sequences.
//!
//! Both exporters are pure transformations: a sequence of results in, a file
//! buffer out, no state. They share one column order so the document and the
//! spreadsheet always agree.

pub mod pdf;
pub mod xlsx;

use taxon_core::ClassificationResult;

pub use pdf::render_pdf;
pub use xlsx::render_xlsx;

/// Fixed export column order, shared by every export format.
pub const RESULT_COLUMNS: [&str; 5] = [
    "Code",
    "Category",
    "GST Rate (%)",
    "Description",
    "Reason for Match",
];

/// Project results into export rows in [`RESULT_COLUMNS`] order.
pub fn result_rows(results: &[ClassificationResult]) -> Vec<[String; 5]> {
    results
        .iter()
        .map(|r| {
            [
                r.code.clone(),
                r.category.label().to_string(),
                format_rate(r.gst_rate),
                r.description.clone(),
                r.reason.clone(),
            ]
        })
        .collect()
}

/// Render a GST rate without a trailing `.0` for whole percentages.
fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.0}", rate)
    } else {
        format!("{}", rate)
    }
}
