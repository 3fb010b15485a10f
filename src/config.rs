//! Configuration management for Folio
//!
//! Handles loading the application configuration.
//! Configuration is a JSON file in the per-user config directory; a
//! missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier following reverse-DNS convention
pub const APP_ID: &str = "site.folio.Folio";

/// Configuration file name inside the config directory
pub const CONFIG_FILE: &str = "config.json";

/// Default output directory for rendered pages
pub const DEFAULT_OUTPUT_DIR: &str = "dist";

/// Pages whose side navigation follows the resume menu
pub const DEFAULT_RESUME_PAGES: [&str; 3] = [
    "resume_education.html",
    "resume_experience.html",
    "resume_awards.html",
];

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site rendering configuration
    pub site: SiteConfig,

    /// Preference storage configuration
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from the default location or return defaults
    pub fn load() -> ConfigResult<Self> {
        let path = Self::config_dir()?.join(CONFIG_FILE);
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, defaults when it does not exist
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot name a page
    pub fn validate(&self) -> ConfigResult<()> {
        for page in &self.site.resume_pages {
            if page.is_empty() || page.contains('/') || page.contains('\\') {
                return Err(ConfigError::InvalidValue {
                    key: "site.resume_pages".to_string(),
                    reason: format!("'{}' is not a bare file name", page),
                });
            }
        }
        Ok(())
    }

    /// Whether a page uses the resume side navigation
    pub fn is_resume_page(&self, page_name: &str) -> bool {
        self.site.resume_pages.iter().any(|p| p == page_name)
    }

    /// Get the configuration directory path
    pub fn config_dir() -> ConfigResult<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }

    /// Get the data directory path (for stored preferences)
    pub fn data_dir() -> ConfigResult<PathBuf> {
        dirs::data_dir()
            .map(|p| p.join(APP_ID))
            .ok_or(ConfigError::DirectoryError)
    }
}

/// Site rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Translation table file (bundled table when unset)
    pub translations: Option<PathBuf>,

    /// File names of pages that get the resume side navigation
    pub resume_pages: Vec<String>,

    /// Where rendered pages are written
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            translations: None,
            resume_pages: DEFAULT_RESUME_PAGES.iter().map(|p| p.to_string()).collect(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Preference storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Preference file (data directory when unset)
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.output_dir, PathBuf::from("dist"));
        assert!(config.site.translations.is_none());
        assert!(config.is_resume_page("resume_awards.html"));
        assert!(!config.is_resume_page("index.html"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "site": { "output_dir": "public" } }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.site.output_dir, PathBuf::from("public"));
        assert_eq!(config.site.resume_pages.len(), 3);
        assert!(config.storage.path.is_none());
    }

    #[test]
    fn test_invalid_resume_page_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "site": { "resume_pages": ["pages/a.html"] } }"#).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[]").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
