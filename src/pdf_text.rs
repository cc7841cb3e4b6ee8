//! Per-page plain text of a rendered PDF.
//!
//! The rendered PDF is the page-number oracle for the audit: wherever
//! a link's visible text occurs in a page's extracted text, that page
//! is reported. Rendering the DOCX to PDF happens outside this tool;
//! callers hand in the finished file.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::Path;

use crate::audit::PageText;

/// Extract the plain text of every page, in page-number order.
///
/// Page numbers are lopdf's 1-based numbering with no gaps. A page
/// whose content streams cannot be decoded yields empty text and a
/// warning, so one bad page does not sink the whole audit; an
/// unreadable file is fatal.
pub fn extract_page_texts(path: &Path) -> Result<Vec<PageText>> {
    let doc = lopdf::Document::load(path)
        .with_context(|| format!("Failed to load PDF: {}", path.display()))?;

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut pages: Vec<PageText> = page_numbers
        .par_iter()
        .map(|&page_number| {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Page {}: text extraction failed: {}", page_number, e);
                    String::new()
                }
            };
            PageText { page_number, text }
        })
        .collect();

    // Output order is by page number regardless of traversal order.
    pages.sort_by_key(|p| p.page_number);
    Ok(pages)
}
