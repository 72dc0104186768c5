//! Core types for the Utsav story archive.
//!
//! This crate holds everything the other crates share: configuration,
//! the unified error taxonomy, the domain model (districts, submissions,
//! archive records, the submission state machine), upload validation, and
//! the retry policy applied to remote calls.

pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod validation;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use retry::RetryPolicy;
