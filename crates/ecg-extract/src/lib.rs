//! ECG report field extraction
//!
//! This crate turns the raw text of a fixed-layout ECG report page into a
//! structured [`ReportRecord`]: patient metadata fields plus a renumbered
//! list of clinical observations.
//!
//! Extraction is best-effort by design: every marker that cannot be located
//! leaves its field empty, and no input ever makes extraction fail.

pub mod fields;
pub mod observations;
pub mod record;

pub use fields::extract_record;
pub use observations::split_observations;
pub use record::ReportRecord;
