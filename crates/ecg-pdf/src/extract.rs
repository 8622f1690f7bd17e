//! Plain-text extraction with page boundaries.

use crate::error::PdfError;

/// Extract the plain text of a single page (1-indexed) from PDF bytes.
///
/// The whole document is rendered to text page by page; asking for a page
/// beyond the end reports how many pages the document actually has, so a
/// too-short report surfaces as a structural failure instead of a guess.
pub fn page_text(pdf_bytes: &[u8], page_number: u32) -> Result<String, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| PdfError::Extraction(e.to_string()))?;

    page_number
        .checked_sub(1)
        .and_then(|index| pages.get(index as usize))
        .cloned()
        .ok_or(PdfError::PageOutOfRange {
            wanted: page_number,
            have: pages.len(),
        })
}
