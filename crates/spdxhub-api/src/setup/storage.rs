//! Media storage setup

use anyhow::{Context, Result};
use spdxhub_core::Config;
use spdxhub_storage::{LocalStorage, Storage};
use std::sync::Arc;

/// Create the storage backend rooted at the configured media directory.
///
/// Storage is local-only: the external toolchain reads and writes real
/// filesystem paths, so the media root must be a mounted directory.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.media_root.clone(), config.media_base_url.clone())
        .await
        .context("Failed to initialize media storage")?;

    tracing::info!(
        media_root = %config.media_root,
        media_base_url = %config.media_base_url,
        "Media storage initialized"
    );

    Ok(Arc::new(storage))
}
