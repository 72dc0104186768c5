//! Request-path services.

pub mod drafts;
pub mod workflow;

pub use drafts::DraftStore;
pub use workflow::{RemoteServices, SavedSubmission, SubmissionWorkflow};
