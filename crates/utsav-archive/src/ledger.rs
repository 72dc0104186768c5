//! The submission ledger: header-validating, append-only row writes.

use std::sync::Arc;

use utsav_core::models::{ArchiveRecord, CANONICAL_HEADER};
use utsav_core::RetryPolicy;

use crate::sheet::{SheetError, Worksheet};

/// Where a record landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    /// 1-based row index the record was written to. When `positional` is
    /// false this is the computed target; the store may have chosen a
    /// different row.
    pub row: u32,
    /// Whether the positional insert succeeded (false = unconditional
    /// append fallback was used).
    pub positional: bool,
}

/// Appends one [`ArchiveRecord`] row per saved submission, repairing the
/// header row first when it disagrees with [`CANONICAL_HEADER`].
///
/// Reads are retried under the configured policy; writes are attempted
/// once, because the worksheet API is not idempotent and a retried write
/// that actually landed would duplicate a row.
pub struct RecordLedger {
    worksheet: Arc<dyn Worksheet>,
    retry: RetryPolicy,
}

impl RecordLedger {
    pub fn new(worksheet: Arc<dyn Worksheet>, retry: RetryPolicy) -> Self {
        Self { worksheet, retry }
    }

    /// Append `record` as the next row. The header is verified (and
    /// repaired if needed) before any data row is written.
    pub async fn append(&self, record: &ArchiveRecord) -> Result<AppendOutcome, SheetError> {
        self.ensure_header().await?;

        let count = self
            .retry
            .run("worksheet.row_count", || self.worksheet.row_count())
            .await?;
        let next = count + 1;
        let cells = record.to_row();

        match self.worksheet.insert_row(next, &cells).await {
            Ok(()) => {
                tracing::info!(row = next, "Submission recorded in ledger");
                Ok(AppendOutcome {
                    row: next,
                    positional: true,
                })
            }
            Err(err) => {
                // Positional insert failed; fall back to letting the store
                // pick the row. A concurrent writer may make the result
                // non-contiguous with `next`.
                tracing::warn!(
                    row = next,
                    error = %err,
                    "Positional insert failed, falling back to append"
                );
                self.worksheet.append_row(&cells).await?;
                Ok(AppendOutcome {
                    row: next,
                    positional: false,
                })
            }
        }
    }

    /// Verify the header row cell-by-cell against the canonical header and
    /// repair it when absent, short, or mismatched. The repair is
    /// destructive and all-or-nothing: row 1 is deleted (if present) and
    /// the canonical header inserted; existing data columns are not
    /// migrated.
    async fn ensure_header(&self) -> Result<(), SheetError> {
        let header = self
            .retry
            .run("worksheet.row", || self.worksheet.row(1))
            .await?;

        if let Some(ref cells) = header {
            if header_matches(cells) {
                return Ok(());
            }
            tracing::warn!(
                found = ?cells,
                "Ledger header mismatch, repairing"
            );
            self.worksheet.delete_row(1).await?;
        } else {
            tracing::info!("Ledger header absent, writing canonical header");
        }

        let canonical: Vec<String> = CANONICAL_HEADER.iter().map(|s| s.to_string()).collect();
        self.worksheet.insert_row(1, &canonical).await
    }
}

fn header_matches(cells: &[String]) -> bool {
    cells.len() == CANONICAL_HEADER.len()
        && cells
            .iter()
            .zip(CANONICAL_HEADER.iter())
            .all(|(cell, expected)| cell == expected)
}
