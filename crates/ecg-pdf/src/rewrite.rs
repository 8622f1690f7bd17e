//! In-place replacement of the report page.

use crate::compose::compose_page;
use crate::error::PdfError;
use crate::extract::page_text;
use crate::signature::SignatureImage;
use ecg_extract::extract_record;
use lopdf::{Document, Object};
use std::fs;
use std::path::Path;
use tracing::debug;

/// The report body lives on the second page of every source document.
pub const REPORT_PAGE: u32 = 2;

/// Rebuild the report page of one document and write the result back to the
/// same path.
///
/// The existing page object is swapped for the newly composed one under the
/// same object id, so the page tree, page count, and all other pages stay
/// untouched. The output is written to a sibling temporary file and renamed
/// over the original, so a failure mid-write leaves the input intact.
pub fn rewrite_report(path: &Path, signature: &SignatureImage) -> Result<(), PdfError> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let mut doc = Document::load_mem(&bytes).map_err(|e| PdfError::Parse(e.to_string()))?;

    let pages = doc.get_pages();
    let page_id = *pages
        .get(&REPORT_PAGE)
        .ok_or(PdfError::PageOutOfRange {
            wanted: REPORT_PAGE,
            have: pages.len(),
        })?;

    let text = page_text(&bytes, REPORT_PAGE)?;
    let record = extract_record(&text);
    debug!(?record, path = %path.display(), "extracted report record");

    // The composed page dictionary lacks Parent; reattach the old one so the
    // page stays in its original position in the tree.
    let parent = doc
        .get_object(page_id)
        .ok()
        .and_then(|obj| obj.as_dict().ok())
        .and_then(|dict| dict.get(b"Parent").ok())
        .cloned();

    let mut new_page = compose_page(&mut doc, &record, signature)?;
    if let Some(parent) = parent {
        new_page.set("Parent", parent);
    }
    doc.objects.insert(page_id, Object::Dictionary(new_page));

    doc.prune_objects();
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Operation(format!("Save failed: {}", e)))?;

    let tmp = path.with_extension("pdf.tmp");
    fs::write(&tmp, &buffer).map_err(|e| io_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_error(path, e))?;

    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> PdfError {
    PdfError::Io {
        path: path.to_path_buf(),
        source,
    }
}
