//! Domain models.

mod district;
mod draft;
mod record;
mod state;
mod submission;

pub use district::District;
pub use draft::SubmissionDraft;
pub use record::{ArchiveRecord, CANONICAL_HEADER, ROW_TIMESTAMP_FORMAT};
pub use state::SubmissionState;
pub use submission::{
    Attachment, LanguageMode, RemoteReference, Submission, Summary, SummaryStrategy,
};
