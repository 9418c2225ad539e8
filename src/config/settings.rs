//! Application settings

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::client::DEFAULT_BASE_URL;
use crate::grid::paginate::DEFAULT_PAGE_SIZE;
use crate::grid::{GridConfig, SizingMode};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Compute API base URL
    pub api_base_url: String,

    /// Compute API request timeout in seconds
    pub request_timeout_secs: u64,

    /// Database file path
    pub database_path: String,

    /// Rows per grid page
    pub page_size: usize,

    /// Page size presets offered by the selector
    pub page_size_options: Vec<usize>,

    /// Horizontal space reserved around grids when sizing columns
    pub viewport_padding: u16,

    /// Column sizing strategy
    pub sizing: SizingMode,

    /// Theme name
    pub theme: String,

    /// Log level
    pub log_level: String,

    /// Log file path
    pub log_file: String,

    /// Delay before the assistant answers, in milliseconds
    pub assistant_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            database_path: Self::default_db_path().to_string_lossy().to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: vec![25, 50, 100],
            viewport_padding: 4,
            sizing: SizingMode::Equal,
            theme: "default".to_string(),
            log_level: "info".to_string(),
            log_file: Self::default_log_path().to_string_lossy().to_string(),
            assistant_delay_ms: 900,
        }
    }
}

impl Settings {
    /// Load settings from file or create default
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let settings: Self = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_delay_ms)
    }

    /// Grid defaults shared by every table; screens adjust the rest
    pub fn grid_config(&self) -> GridConfig {
        let page_size = if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        };
        GridConfig {
            page_size,
            page_size_options: self.page_size_options.clone(),
            sizing: self.sizing,
            viewport_padding: self.viewport_padding,
            ..GridConfig::default()
        }
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        ProjectDirs::from("com", "rosteriq", "rosteriq-tui")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".config")
                    .join("rosteriq-tui")
            })
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get default database path
    pub fn default_db_path() -> PathBuf {
        Self::config_dir().join("rosteriq.db")
    }

    pub fn default_log_path() -> PathBuf {
        Self::config_dir().join("rosteriq-tui.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.json");
        let path = path.to_str().expect("utf8");

        let settings = Settings {
            api_base_url: "http://stats.example:9000".into(),
            page_size: 50,
            sizing: SizingMode::Hinted,
            ..Settings::default()
        };
        settings.save(Some(path)).expect("save");

        let loaded = Settings::load(Some(path)).expect("load");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"page_size": 100, "sizing": "hinted"}"#).expect("write");

        let loaded = Settings::load(path.to_str()).expect("load");
        assert_eq!(loaded.page_size, 100);
        assert_eq!(loaded.sizing, SizingMode::Hinted);
        assert_eq!(loaded.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.page_size_options, vec![25, 50, 100]);
        assert_eq!(loaded.assistant_delay(), Duration::from_millis(900));
    }

    #[test]
    fn absent_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.json");
        let loaded = Settings::load(path.to_str()).expect("load");
        assert_eq!(loaded.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{page_size").expect("write");
        assert!(Settings::load(path.to_str()).is_err());
    }

    #[test]
    fn grid_config_uses_settings() {
        let settings = Settings {
            page_size: 0,
            viewport_padding: 8,
            ..Settings::default()
        };
        let config = settings.grid_config();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.viewport_padding, 8);
        assert_eq!(config.page_size_options, vec![25, 50, 100]);
    }
}
