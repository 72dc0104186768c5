use std::sync::Arc;

use utsav_core::Config;

use crate::{LocalStorage, Storage, StorageResult};

/// Create the intake storage backend from configuration. The local
/// filesystem is the only backend today; the factory keeps call sites
/// decoupled from that choice.
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(
        config.upload_dir().to_string(),
        config.upload_base_url().to_string(),
    )
    .await?;
    Ok(Arc::new(storage))
}
