use std::path::PathBuf;
use vidflow_core::config::Config;
use vidflow_core::store::Store;
use vidflow_core::VidError;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Settings are re-read per request so edits made through the CLI are
    /// picked up without a restart.
    pub fn store(&self) -> Result<Store, VidError> {
        let config = Config::load(&self.root)?;
        Ok(Store::from_config(&self.root, &config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_stores_root() {
        let state = AppState::new(PathBuf::from("/tmp/test"));
        assert_eq!(state.root, PathBuf::from("/tmp/test"));
    }

    #[test]
    fn store_requires_settings() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(dir.path().to_path_buf());
        assert!(matches!(state.store(), Err(VidError::NotInitialized)));
    }

    #[test]
    fn store_resolves_paths_under_root() {
        let dir = tempfile::TempDir::new().unwrap();
        Config::default().save(dir.path()).unwrap();
        let state = AppState::new(dir.path().to_path_buf());
        let store = state.store().unwrap();
        assert_eq!(store.index_path(), dir.path().join("index.yaml"));
        assert_eq!(store.data_dir(), dir.path().join("manuscript"));
    }
}
