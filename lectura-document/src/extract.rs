use std::fs;
use std::path::Path;

use log::{debug, warn};
use lopdf::Document;

use crate::error::ExtractionError;
use crate::model::ExtractedText;

/// Extracts the text of every page, in document order, each followed by `\n`.
///
/// A page that fails to extract aborts the whole document; there is no OCR
/// fallback for pages without a text layer.
pub fn extract_text(bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
    let document = Document::load_mem(bytes).map_err(|e| ExtractionError::Load(e.to_string()))?;
    extract_document(&document)
}

pub fn extract_text_from_path(path: &Path) -> Result<ExtractedText, ExtractionError> {
    let bytes = fs::read(path)?;
    extract_text(&bytes)
}

fn extract_document(document: &Document) -> Result<ExtractedText, ExtractionError> {
    // Keyed by page number, so iteration is document order.
    let pages = document.get_pages();
    let mut raw = String::new();

    for &page in pages.keys() {
        let text = document
            .extract_text(&[page])
            .map_err(|e| ExtractionError::Page {
                page,
                reason: e.to_string(),
            })?;
        debug!("Page {page}: {} characters", text.chars().count());

        // lopdf closes every text object with a newline; the page separator is ours.
        raw.push_str(text.trim_end_matches(['\n', '\r']));
        raw.push('\n');
    }

    if raw.trim().is_empty() {
        warn!("PDF has {} page(s) but no extractable text", pages.len());
    }

    Ok(ExtractedText {
        raw,
        page_count: pages.len(),
    })
}
