//! Remote archival for the Utsav story archive.
//!
//! Two remote capabilities live here, both reached with a bearer credential
//! resolved at startup:
//!
//! - the **object store** (Drive-style REST API): a folder per district
//!   under a configured root, files mirrored best-effort;
//! - the **tabular store** (spreadsheet REST API): the system of record,
//!   one append-only row per saved submission behind a header-validating
//!   ledger.
//!
//! In-memory implementations of both traits back the test suites and
//! credential-less development.

pub mod archiver;
pub mod credentials;
pub mod ledger;
pub mod memory;
pub mod object_store;
pub mod sheet;

pub use archiver::RemoteArchiver;
pub use credentials::{acquire_credentials, CredentialError, ServiceCredentials};
pub use ledger::{AppendOutcome, RecordLedger};
pub use memory::{MemoryObjectStore, MemoryWorksheet};
pub use object_store::{ArchiveError, HttpObjectStore, ObjectStore, RemoteFile, RemoteFolder};
pub use sheet::{HttpWorksheet, SheetError, Worksheet};
