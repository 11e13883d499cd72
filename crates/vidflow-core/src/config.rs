use crate::error::{Result, VidError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

/// Contents of `settings.yaml`. Paths are relative to the project root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_index_file")]
    pub index_file: String,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

fn default_data_dir() -> String {
    paths::DEFAULT_DATA_DIR.to_string()
}

fn default_index_file() -> String {
    paths::DEFAULT_INDEX_FILE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_dir: default_data_dir(),
            index_file: default_index_file(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::settings_path(root);
        if !path.exists() {
            return Err(VidError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Option<Config> = serde_yaml::from_str(&data)?;
        Ok(cfg.unwrap_or_default())
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::settings_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.data_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "dataDir is empty".to_string(),
            });
        }

        if self.index_file.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "indexFile is empty".to_string(),
            });
        }

        if !self.data_dir.is_empty() && self.data_dir == self.index_file {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "dataDir and indexFile both point at '{}'",
                    self.data_dir
                ),
            });
        }

        if self.server.port == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "server.port is 0; the OS will pick a port on every start".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(yaml.contains("dataDir: manuscript"));
        assert!(yaml.contains("indexFile: index.yaml"));
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let parsed: Config = serde_yaml::from_str("indexFile: videos.yaml\n").unwrap();
        assert_eq!(parsed.index_file, "videos.yaml");
        assert_eq!(parsed.data_dir, "manuscript");
        assert_eq!(parsed.server.port, 8080);
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(VidError::NotInitialized)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.server.port = 9000;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.server.port, 9000);
    }

    #[test]
    fn empty_settings_file_is_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.yaml"), "").unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.data_dir, "manuscript");
    }

    #[test]
    fn validate_default_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_bad_paths_and_port() {
        let cfg = Config {
            data_dir: "same".to_string(),
            index_file: "same".to_string(),
            server: ServerConfig { port: 0 },
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("both point")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Warning && w.message.contains("port")));
    }

    #[test]
    fn validate_empty_paths() {
        let cfg = Config {
            data_dir: String::new(),
            index_file: " ".to_string(),
            ..Config::default()
        };
        assert_eq!(
            cfg.validate()
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count(),
            2
        );
    }
}
