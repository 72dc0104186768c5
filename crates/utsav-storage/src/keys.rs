//! Storage key generation and checks shared by backends.

use utsav_core::models::District;

use crate::traits::{StorageError, StorageResult};

/// Build the district-scoped key for a stored attachment.
pub fn submission_key(district: District, stored_name: &str) -> String {
    format!("{}/{}", district.as_str(), stored_name)
}

/// Reject keys that could escape the storage root.
pub fn check_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_key_layout() {
        assert_eq!(
            submission_key(District::Hyderabad, "20260714_093005_bonalu.jpg"),
            "Hyderabad/20260714_093005_bonalu.jpg"
        );
    }

    #[test]
    fn test_check_key_rejects_traversal() {
        assert!(check_key("../etc/passwd").is_err());
        assert!(check_key("/etc/passwd").is_err());
        assert!(check_key("Hyderabad\\..\\file").is_err());
        assert!(check_key("Hyderabad/file.jpg").is_ok());
    }
}
