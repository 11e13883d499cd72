use std::path::{Path, PathBuf};
use vidflow_core::paths;

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `VIDFLOW_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `settings.yaml`
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_settings_dir(&cwd).unwrap_or(cwd)
}

fn find_settings_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(paths::SETTINGS_FILE).is_file())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_settings_in_ancestor() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(paths::SETTINGS_FILE), "version: 1\n").unwrap();
        let subdir = dir.path().join("manuscript/rust");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_settings_dir(&subdir).as_deref(), Some(dir.path()));
    }

    #[test]
    fn no_settings_anywhere() {
        let dir = TempDir::new().unwrap();
        let subdir = dir.path().join("a/b");
        std::fs::create_dir_all(&subdir).unwrap();
        // An ancestor of the temp dir could carry settings.yaml; only assert
        // that nothing inside the temp tree matched.
        if let Some(found) = find_settings_dir(&subdir) {
            assert!(!found.starts_with(dir.path()));
        }
    }
}
