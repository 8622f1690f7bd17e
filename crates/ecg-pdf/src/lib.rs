//! ECG report page rebuilding
//!
//! This crate reads fixed-layout ECG report PDFs, extracts the structured
//! record from the second page's text (via `ecg-extract`), redraws that page
//! as a data table, observation list, and embedded signature image, and
//! splices the new page back into the document in place.
//!
//! The pipeline per document: [`extract::page_text`] →
//! [`ecg_extract::extract_record`] → [`compose::compose_page`] →
//! [`rewrite::rewrite_report`]. [`batch::process_directory`] runs it over a
//! directory, one document at a time.

pub mod batch;
pub mod compose;
pub mod error;
pub mod extract;
pub mod rewrite;
pub mod signature;

pub use batch::{process_directory, BatchConfig, BatchReport};
pub use error::PdfError;
pub use rewrite::rewrite_report;
pub use signature::SignatureImage;
