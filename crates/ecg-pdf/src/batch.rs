//! Directory batch processing.
//!
//! Documents are processed strictly one at a time; a failure on one document
//! is recorded and the batch continues.

use crate::error::PdfError;
use crate::rewrite::rewrite_report;
use crate::signature::SignatureImage;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Fixed paths for one batch run, validated before any document is touched.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory scanned (non-recursively) for `*.pdf` documents.
    pub input_dir: PathBuf,
    /// Signature image embedded on every rebuilt page.
    pub signature_path: PathBuf,
}

impl BatchConfig {
    pub fn validate(&self) -> Result<(), PdfError> {
        if !self.input_dir.is_dir() {
            return Err(PdfError::InvalidConfig(format!(
                "input directory {} does not exist or is not a directory",
                self.input_dir.display()
            )));
        }
        if !self.signature_path.is_file() {
            return Err(PdfError::InvalidConfig(format!(
                "signature image {} does not exist",
                self.signature_path.display()
            )));
        }
        Ok(())
    }
}

/// Outcome of one batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    pub processed: Vec<PathBuf>,
    pub failed: Vec<FailedDocument>,
}

#[derive(Debug, Serialize)]
pub struct FailedDocument {
    pub path: PathBuf,
    pub reason: String,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Rebuild the report page of every PDF in the configured directory.
///
/// The signature image is decoded once, before the first document. Only
/// configuration and directory-listing failures abort the run; per-document
/// failures are recorded in the report and skipped.
pub fn process_directory(config: &BatchConfig) -> Result<BatchReport, PdfError> {
    config.validate()?;
    let signature = SignatureImage::load(&config.signature_path)?;

    let mut documents: Vec<PathBuf> = fs::read_dir(&config.input_dir)
        .map_err(|e| PdfError::Io {
            path: config.input_dir.clone(),
            source: e,
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_pdf(path))
        .collect();
    documents.sort();

    let mut report = BatchReport::default();
    for path in documents {
        match rewrite_report(&path, &signature) {
            Ok(()) => {
                info!(path = %path.display(), "processed report");
                report.processed.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping document");
                report.failed.push(FailedDocument {
                    path,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("pdf"))
}
