//! Spreadsheet rendering for classification results.
//!
//! One `Results` worksheet: a bold header row in [`RESULT_COLUMNS`] order plus
//! one row per result. GST rates are written as numbers so spreadsheet
//! consumers can aggregate them.

use rust_xlsxwriter::{Format, Workbook};

use taxon_core::{ClassificationResult, Error, Result};

use crate::RESULT_COLUMNS;

/// Render `results` as an XLSX workbook buffer.
pub fn render_xlsx(results: &[ClassificationResult]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Results")
        .map_err(|e| Error::Export(format!("failed to name worksheet: {}", e)))?;

    for (column, title) in RESULT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, column as u16, *title, &bold)
            .map_err(|e| Error::Export(format!("failed to write header: {}", e)))?;
    }

    for (index, result) in results.iter().enumerate() {
        let row = index as u32 + 1;
        worksheet
            .write_string(row, 0, result.code.as_str())
            .and_then(|ws| ws.write_string(row, 1, result.category.label()))
            .and_then(|ws| ws.write_number(row, 2, result.gst_rate))
            .and_then(|ws| ws.write_string(row, 3, result.description.as_str()))
            .and_then(|ws| ws.write_string(row, 4, result.reason.as_str()))
            .map_err(|e| Error::Export(format!("failed to write row {}: {}", row, e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Export(format!("failed to render workbook: {}", e)))
}
