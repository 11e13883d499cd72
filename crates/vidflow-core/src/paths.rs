use crate::error::{Result, VidError};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// File layout constants
// ---------------------------------------------------------------------------

pub const SETTINGS_FILE: &str = "settings.yaml";
pub const DEFAULT_INDEX_FILE: &str = "index.yaml";
pub const DEFAULT_DATA_DIR: &str = "manuscript";

pub const RECORD_EXT: &str = "yaml";
pub const SCRIPT_EXT: &str = "md";

// ---------------------------------------------------------------------------
// Sanitization
// ---------------------------------------------------------------------------

/// Directory name for a category: lower-case, spaces become hyphens.
pub fn category_dir_name(category: &str) -> String {
    category.to_lowercase().replace(' ', "-")
}

/// File stem for an item name: same as the category rule, with `?` removed.
pub fn item_file_stem(name: &str) -> String {
    category_dir_name(name).replace('?', "")
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// The one place item record paths are derived. Reads, writes, creates and
/// deletes all go through here.
pub fn item_path(data_dir: &Path, category: &str, name: &str) -> PathBuf {
    with_ext(data_dir, category, name, RECORD_EXT)
}

/// Sibling manuscript file next to the item record.
pub fn script_path(data_dir: &Path, category: &str, name: &str) -> PathBuf {
    with_ext(data_dir, category, name, SCRIPT_EXT)
}

fn with_ext(data_dir: &Path, category: &str, name: &str, ext: &str) -> PathBuf {
    data_dir
        .join(category_dir_name(category))
        .join(format!("{}.{ext}", item_file_stem(name)))
}

pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE)
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[^./\\][^/\\]*$").unwrap())
}

/// Names and categories become path components, so reject separators,
/// leading dots, blank input and names that sanitize to an empty stem.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty()
        || name.len() > 200
        || !name_re().is_match(name)
        || item_file_stem(name).is_empty()
    {
        return Err(VidError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
