//! HTTP service for the Utsav story archive.
//!
//! Exposed as a library so integration tests can build the router with
//! in-memory backends; the binary entry point lives in `main.rs`.

pub mod api_doc;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
