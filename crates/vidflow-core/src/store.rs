use crate::config::Config;
use crate::error::Result;
use crate::paths;
use crate::video::Video;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// IndexEntry
// ---------------------------------------------------------------------------

/// Lightweight pointer to an item record. The index file is an ordered list
/// of these and is the authoritative enumeration of all videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub category: String,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    /// True when the entry points at the same record file as (name, category).
    /// Compared through the path sanitizers, so casing and `?` do not matter.
    pub fn matches(&self, name: &str, category: &str) -> bool {
        paths::item_file_stem(&self.name) == paths::item_file_stem(name)
            && paths::category_dir_name(&self.category) == paths::category_dir_name(category)
    }
}

// ---------------------------------------------------------------------------
// Record I/O
// ---------------------------------------------------------------------------

/// Read an item record. A missing or unparseable file yields an empty
/// `Video`; callers detect absence with [`Video::is_unidentified`].
pub fn load(path: &Path) -> Video {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Video::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read video record");
            return Video::default();
        }
    };
    match serde_yaml::from_str::<Option<Video>>(&data) {
        Ok(video) => video.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed video record, treating as empty");
            Video::default()
        }
    }
}

/// Serialize and overwrite an item record.
pub fn save(video: &Video, path: &Path) -> Result<()> {
    let data = serde_yaml::to_string(video)?;
    crate::io::atomic_write(path, data.as_bytes())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Locations of the index file and the per-category record directories.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
    index_path: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            index_path: index_path.into(),
        }
    }

    pub fn from_config(root: &Path, config: &Config) -> Self {
        Self::new(root.join(&config.data_dir), root.join(&config.index_file))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn path_for(&self, category: &str, name: &str) -> PathBuf {
        paths::item_path(&self.data_dir, category, name)
    }

    pub fn script_path_for(&self, category: &str, name: &str) -> PathBuf {
        paths::script_path(&self.data_dir, category, name)
    }

    // -----------------------------------------------------------------------
    // Index
    // -----------------------------------------------------------------------

    pub fn load_index(&self) -> Result<Vec<IndexEntry>> {
        if !self.index_path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.index_path)?;
        let entries: Option<Vec<IndexEntry>> = serde_yaml::from_str(&data)?;
        Ok(entries.unwrap_or_default())
    }

    pub fn save_index(&self, entries: &[IndexEntry]) -> Result<()> {
        let data = serde_yaml::to_string(entries)?;
        crate::io::atomic_write(&self.index_path, data.as_bytes())?;
        tracing::debug!(entries = entries.len(), "index saved");
        Ok(())
    }

    /// Append an entry unless it is already present. Returns true if added.
    pub fn add_entry(&self, entry: IndexEntry) -> Result<bool> {
        let mut entries = self.load_index()?;
        if entries.iter().any(|e| e.matches(&entry.name, &entry.category)) {
            return Ok(false);
        }
        entries.push(entry);
        self.save_index(&entries)?;
        Ok(true)
    }

    /// Drop every entry for (name, category). Returns true if any was removed.
    pub fn remove_entry(&self, name: &str, category: &str) -> Result<bool> {
        let mut entries = self.load_index()?;
        let before = entries.len();
        entries.retain(|e| !e.matches(name, category));
        if entries.len() == before {
            return Ok(false);
        }
        self.save_index(&entries)?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{Playlist, Sponsorship};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> Store {
        Store::new(dir.path().join("manuscript"), dir.path().join("index.yaml"))
    }

    #[test]
    fn entries_match_by_record_path() {
        let entry = IndexEntry::new("My Video?", "AI Tools");
        assert!(entry.matches("my video", "ai tools"));
        assert!(entry.matches("My Video?", "AI Tools"));
        assert!(!entry.matches("my video 2", "ai tools"));
        assert!(!entry.matches("my video", "ai"));
    }

    #[test]
    fn remove_entry_ignores_casing() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(s.add_entry(IndexEntry::new("My Video", "AI Tools")).unwrap());
        assert!(!s.add_entry(IndexEntry::new("my video", "ai tools")).unwrap());
        assert_eq!(s.load_index().unwrap().len(), 1);
        assert!(s.remove_entry("MY VIDEO", "ai tools").unwrap());
        assert!(s.load_index().unwrap().is_empty());
    }

    #[test]
    fn load_missing_file_is_empty_video() {
        let dir = TempDir::new().unwrap();
        let video = load(&dir.path().join("nope.yaml"));
        assert!(video.is_unidentified());
    }

    #[test]
    fn load_malformed_file_is_empty_video() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "name: [unterminated").unwrap();
        assert!(load(&path).is_unidentified());
    }

    #[test]
    fn load_empty_file_is_empty_video() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.yaml");
        std::fs::write(&path, "").unwrap();
        assert!(load(&path).is_unidentified());
    }

    #[test]
    fn save_load_round_trip_with_empty_sponsorship_and_playlists() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let mut video = Video::new("Round Trip?", "Dev Tools");
        video.date = "2030-01-21T16:00".to_string();
        video.code = true;
        video.tags = "-".to_string();
        let path = s.path_for(&video.category, &video.name);
        save(&video, &path).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded, video);
        assert_eq!(loaded.sponsorship, Sponsorship::default());
        assert!(loaded.playlists.is_empty());
    }

    #[test]
    fn save_load_round_trip_with_filled_nested_values() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let mut video = Video::new("nested", "ai");
        video.sponsorship = Sponsorship {
            amount: "1000".to_string(),
            emails: "a@example.com".to_string(),
            blocked: String::new(),
        };
        video.playlists = vec![Playlist {
            title: "AI".to_string(),
            id: "PL123".to_string(),
        }];
        let path = s.path_for("ai", "nested");
        save(&video, &path).unwrap();
        assert_eq!(load(&path), video);
    }

    #[test]
    fn record_lands_at_sanitized_path() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let video = Video::new("What Is It?", "Dev Tools");
        save(&video, &s.path_for(&video.category, &video.name)).unwrap();
        assert!(dir
            .path()
            .join("manuscript/dev-tools/what-is-it.yaml")
            .exists());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.yaml");
        std::fs::write(
            &path,
            "name: legacy\ncategory: ai\ninit:\n  completed: 3\n  total: 8\n",
        )
        .unwrap();
        let video = load(&path);
        assert_eq!(video.name, "legacy");
        assert_eq!(video.category, "ai");
    }

    #[test]
    fn missing_index_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).load_index().unwrap().is_empty());
    }

    #[test]
    fn index_round_trip_preserves_order() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let entries = vec![
            IndexEntry::new("b", "x"),
            IndexEntry::new("a", "y"),
            IndexEntry::new("c", "x"),
        ];
        s.save_index(&entries).unwrap();
        assert_eq!(s.load_index().unwrap(), entries);
    }

    #[test]
    fn add_and_remove_entry() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        assert!(s.add_entry(IndexEntry::new("a", "x")).unwrap());
        assert!(!s.add_entry(IndexEntry::new("a", "x")).unwrap());
        assert!(s.add_entry(IndexEntry::new("b", "x")).unwrap());
        assert!(s.remove_entry("a", "x").unwrap());
        assert!(!s.remove_entry("a", "x").unwrap());
        assert_eq!(s.load_index().unwrap(), vec![IndexEntry::new("b", "x")]);
    }
}
