//! Service credential resolution.
//!
//! Two sources, checked in order: a local service-account keyfile, then an
//! externally-injected JSON bundle (environment secret). Token minting and
//! refresh are the deployment environment's job; this module only reads
//! bearer material that must grant read/write access to both the tabular
//! store and the object store.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("No credential source configured (no keyfile, no injected bundle)")]
    NotConfigured,

    #[error("Failed to read credential file {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed credential material: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Credential material is incomplete: {0}")]
    Incomplete(String),
}

/// Bearer credential for the remote archive services.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceCredentials {
    /// Service identity, for logging only.
    pub account_email: String,
    /// Bearer token presented to both remote services.
    pub access_token: String,
}

impl ServiceCredentials {
    fn validate(self) -> Result<Self, CredentialError> {
        if self.access_token.trim().is_empty() {
            return Err(CredentialError::Incomplete(
                "access_token is empty".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Resolve credentials: keyfile first (if it exists), injected JSON bundle
/// as fallback.
pub fn acquire_credentials(
    keyfile: &Path,
    injected_json: Option<&str>,
) -> Result<ServiceCredentials, CredentialError> {
    if keyfile.exists() {
        let raw = std::fs::read_to_string(keyfile).map_err(|source| {
            CredentialError::Unreadable {
                path: keyfile.display().to_string(),
                source,
            }
        })?;
        let creds: ServiceCredentials = serde_json::from_str(&raw)?;
        let creds = creds.validate()?;
        tracing::info!(
            account = %creds.account_email,
            source = "keyfile",
            "Archive credentials loaded"
        );
        return Ok(creds);
    }

    if let Some(raw) = injected_json {
        let creds: ServiceCredentials = serde_json::from_str(raw)?;
        let creds = creds.validate()?;
        tracing::info!(
            account = %creds.account_email,
            source = "injected",
            "Archive credentials loaded"
        );
        return Ok(creds);
    }

    Err(CredentialError::NotConfigured)
}
