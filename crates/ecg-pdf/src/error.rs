use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("Page {wanted} does not exist (document has {have} pages)")]
    PageOutOfRange { wanted: u32, have: usize },

    #[error("Failed to decode signature image: {0}")]
    Image(String),

    #[error("PDF operation failed: {0}")]
    Operation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
