//! PDF table rendering for classification results.
//!
//! Landscape A4, built-in Helvetica (no font assets needed at runtime), one
//! header row plus one row per result, paginating when a page fills.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use taxon_core::{ClassificationResult, Error, Result};

use crate::{result_rows, RESULT_COLUMNS};

const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;
const MARGIN_MM: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 4.5;
const ROW_GAP_MM: f32 = 2.5;
const FONT_SIZE: f32 = 9.0;

/// Left edge of each column, in mm from the page's left margin side.
const COLUMN_X_MM: [f32; 5] = [12.0, 40.0, 64.0, 90.0, 185.0];

/// Wrap width per column, in characters at the table font size.
const COLUMN_WRAP: [usize; 5] = [14, 10, 10, 50, 55];

/// Render `results` as a PDF table in [`RESULT_COLUMNS`] order.
pub fn render_pdf(results: &[ClassificationResult]) -> Result<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        "HSN/SAC Classification Results",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Table",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Export(format!("failed to load font: {}", e)))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Export(format!("failed to load font: {}", e)))?;

    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    draw_header(&current, &bold, y);
    y -= LINE_HEIGHT_MM + ROW_GAP_MM;

    for row in result_rows(results) {
        let cells: Vec<Vec<String>> = row
            .iter()
            .zip(COLUMN_WRAP)
            .map(|(cell, width)| wrap(cell, width))
            .collect();
        let row_lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        let row_height = row_lines as f32 * LINE_HEIGHT_MM + ROW_GAP_MM;

        if y - row_height < MARGIN_MM {
            let (next_page, next_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Table");
            current = doc.get_page(next_page).get_layer(next_layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
            draw_header(&current, &bold, y);
            y -= LINE_HEIGHT_MM + ROW_GAP_MM;
        }

        for (column, lines) in cells.iter().enumerate() {
            for (line_idx, line) in lines.iter().enumerate() {
                current.use_text(
                    line.clone(),
                    FONT_SIZE,
                    Mm(COLUMN_X_MM[column]),
                    Mm(y - line_idx as f32 * LINE_HEIGHT_MM),
                    &font,
                );
            }
        }
        y -= row_height;
    }

    save(doc)
}

fn draw_header(layer: &printpdf::PdfLayerReference, bold: &IndirectFontRef, y: f32) {
    for (column, title) in RESULT_COLUMNS.iter().enumerate() {
        layer.use_text(title.to_string(), FONT_SIZE, Mm(COLUMN_X_MM[column]), Mm(y), bold);
    }
}

fn save(doc: PdfDocumentReference) -> Result<Vec<u8>> {
    doc.save_to_bytes()
        .map_err(|e| Error::Export(format!("failed to render PDF: {}", e)))
}

/// Greedy word wrap at `max_chars` per line. Words longer than a line are
/// split hard so a pathological token cannot push text off the page.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let split_at = word
                .char_indices()
                .take(max_chars)
                .last()
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(word.len());
            lines.push(word[..split_at].to_string());
            word = &word[split_at..];
        }
        if word.is_empty() {
            continue;
        }
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= max_chars {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
