pub mod aspects;
pub mod config;
pub mod init;
pub mod phases;
pub mod serve;
pub mod video;

use anyhow::Context;
use std::path::Path;
use vidflow_core::config::Config;
use vidflow_core::store::Store;

/// Load settings.yaml and build the store it describes.
pub(crate) fn open_store(root: &Path) -> anyhow::Result<Store> {
    let config = Config::load(root)
        .with_context(|| format!("failed to load settings from {}", root.display()))?;
    Ok(Store::from_config(root, &config))
}
