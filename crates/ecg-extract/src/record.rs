//! Structured report data extracted from one page.

use serde::{Deserialize, Serialize};

/// Patient metadata and observation list extracted from a report page.
///
/// Every field defaults to empty when its marker is absent from the source
/// text; absence is always represented by emptiness, never by an option.
/// `age` stays textual since the source formatting is not guaranteed numeric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub name: String,
    pub patient_id: String,
    pub age: String,
    pub gender: String,
    pub test_date: String,
    pub report_date: String,

    /// Formatted observation lines, each prefixed with its 1-based index
    /// and `". "`, in document order.
    pub observations: Vec<String>,
}

impl ReportRecord {
    /// True when no field and no observation was recovered from the page.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.patient_id.is_empty()
            && self.age.is_empty()
            && self.gender.is_empty()
            && self.test_date.is_empty()
            && self.report_date.is_empty()
            && self.observations.is_empty()
    }
}
