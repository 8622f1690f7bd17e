//! Marker-based field extraction.
//!
//! Each field is located by an independent bounded search between its own
//! pair of literal markers, so a missing or misplaced marker empties that
//! field without affecting the others. Only the first occurrence of each
//! marker pair in natural order is considered.

use crate::observations::split_observations;
use crate::record::ReportRecord;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"Name:\s*(.*?)Patient ID:").unwrap();
    static ref PATIENT_ID_PATTERN: Regex = Regex::new(r"Patient ID:\s*(.*?)Age:").unwrap();
    static ref AGE_PATTERN: Regex = Regex::new(r"Age:\s*(.*?)Gender:").unwrap();
    static ref GENDER_PATTERN: Regex = Regex::new(r"Gender:\s*(.*?)Test date:").unwrap();
    static ref TEST_DATE_PATTERN: Regex = Regex::new(r"Test date:\s*(.*?)Report date:").unwrap();

    /// The report date is a single whitespace-delimited token, not the full
    /// span up to the next marker. What follows it is checked separately.
    static ref REPORT_DATE_PATTERN: Regex = Regex::new(r"Report date:\s*(\S+)").unwrap();
}

/// Observation section markers, tried in order. The second spelling shows up
/// in reports where the extractor collapsed the space out of the label.
const OBSERVATION_MARKERS: [&str; 2] = ["ECG Observation:", "ECGObservation:"];

/// Extract a [`ReportRecord`] from the raw text of a report page.
///
/// Never fails: every field whose markers are absent (or out of order) is
/// left empty, and a missing observation section yields an empty list.
pub fn extract_record(text: &str) -> ReportRecord {
    let record = ReportRecord {
        name: between(&NAME_PATTERN, text),
        patient_id: between(&PATIENT_ID_PATTERN, text),
        age: between(&AGE_PATTERN, text),
        gender: between(&GENDER_PATTERN, text),
        test_date: between(&TEST_DATE_PATTERN, text),
        report_date: report_date(text),
        observations: match observation_section(text) {
            Some(section) => split_observations(section),
            None => {
                debug!("no observation section marker found");
                Vec::new()
            }
        },
    };

    debug!(
        name_found = !record.name.is_empty(),
        patient_id_found = !record.patient_id.is_empty(),
        report_date_found = !record.report_date.is_empty(),
        observation_count = record.observations.len(),
        "extracted report fields"
    );

    record
}

/// First capture of `pattern` in `text`, trimmed, or empty when absent.
fn between(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The first token after `Report date:`, accepted only when the text after
/// the token runs straight into the observation marker or the end of input.
fn report_date(text: &str) -> String {
    let Some(token) = REPORT_DATE_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
    else {
        return String::new();
    };

    let tail = text[token.end()..].trim_start();
    let at_observation_marker = tail
        .strip_prefix("ECG")
        .map(|rest| rest.trim_start().starts_with("Observation:"))
        .unwrap_or(false);

    if tail.is_empty() || at_observation_marker {
        token.as_str().to_string()
    } else {
        String::new()
    }
}

/// Everything after the first observation marker, trimmed.
fn observation_section(text: &str) -> Option<&str> {
    OBSERVATION_MARKERS
        .iter()
        .find_map(|marker| text.find(marker).map(|pos| (pos, marker.len())))
        .map(|(pos, len)| text[pos + len..].trim())
}
