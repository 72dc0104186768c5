//! Local file intake for the Utsav story archive.
//!
//! This crate provides the storage abstraction and the local filesystem
//! backend that holds the primary copy of every attachment.
//!
//! # Storage key format
//!
//! Keys are district-scoped: `{district}/{stored_name}`, where the stored
//! name is `{timestamp}_{sanitized original name}`. Keys must not contain
//! `..` or a leading `/`. Key generation is centralized in the `keys`
//! module so path handling stays consistent.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod traits;

pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult, StoredFile};
