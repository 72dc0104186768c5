//! The permanent ledger row written for every saved submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::district::District;

/// Canonical header of the submission ledger, in column order. The header
/// text and ordering are fixed; any worksheet whose first row disagrees is
/// repaired (destructively) before a data row is appended.
pub const CANONICAL_HEADER: [&str; 7] = [
    "timestamp",
    "file_name",
    "district_name",
    "english_summary",
    "festival_name",
    "telugu_summary",
    "storage_reference",
];

/// Timestamp format used in ledger rows.
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the submission ledger. Rows are append-only: there is no
/// update or delete path once a record has been written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    pub timestamp: DateTime<Utc>,
    /// Stored file name, or empty for story-only submissions.
    pub file_name: String,
    pub district: District,
    pub english_summary: String,
    pub festival_name: String,
    pub telugu_summary: String,
    /// Remote view link, or `None` when remote archival was skipped or
    /// failed (the row still records the submission).
    pub storage_reference: Option<String>,
}

impl ArchiveRecord {
    /// Render the record as cells matching [`CANONICAL_HEADER`] order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.format(ROW_TIMESTAMP_FORMAT).to_string(),
            self.file_name.clone(),
            self.district.as_str().to_string(),
            self.english_summary.clone(),
            self.festival_name.clone(),
            self.telugu_summary.clone(),
            self.storage_reference.clone().unwrap_or_default(),
        ]
    }
}
