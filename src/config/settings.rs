//! Application settings

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::browser::PageSize;
use crate::models::Company;
use crate::utils::LocaleFormat;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Database file path
    pub database_path: String,

    /// Rows per page when a table opens; must be one of the allowed sizes
    pub default_page_size: PageSize,

    /// Seconds between automatic reloads, 0 disables them
    pub refresh_interval_secs: u64,

    /// Log level
    pub log_level: String,

    /// Log file path
    pub log_file: String,

    /// Theme name
    pub theme: String,

    /// Number, money and date formatting
    pub locale: LocaleFormat,

    /// Issuer printed on invoices
    pub company: Company,

    /// Where exported invoices are written
    pub export_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: Self::default_db_path().to_string_lossy().to_string(),
            default_page_size: PageSize::default(),
            refresh_interval_secs: 0,
            log_level: "info".to_string(),
            log_file: Self::data_dir()
                .join(crate::logging::LOG_FILE)
                .to_string_lossy()
                .to_string(),
            theme: "default".to_string(),
            locale: LocaleFormat::default(),
            company: Company::default(),
            export_dir: Self::data_dir().join("invoices").to_string_lossy().to_string(),
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
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(content)?;
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = path
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "tradedesk", "tradedesk-tui")
    }

    fn fallback_dir(kind: &str) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(kind)
            .join("tradedesk-tui")
    }

    /// Get default config directory
    pub fn config_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| Self::fallback_dir(".config"))
    }

    /// Directory for the database, logs and exports
    pub fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| Self::fallback_dir(".local/share"))
    }

    /// Get default config file path
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Get default database path
    pub fn default_db_path() -> PathBuf {
        Self::data_dir().join("tradedesk.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "default_page_size": 25, "log_level": "debug" }"#).unwrap();
        assert_eq!(settings.default_page_size.get(), 25);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.locale, LocaleFormat::default());
        assert_eq!(settings.refresh_interval_secs, 0);
    }

    #[test]
    fn page_size_outside_allowed_set_is_rejected() {
        assert!(Settings::from_json(r#"{ "default_page_size": 7 }"#).is_err());
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("tradedesk-settings-{}.json", std::process::id()));
        let path_str = path.to_string_lossy().to_string();

        let mut settings = Settings::default();
        settings.company.name = "Lusa Trading".to_string();
        settings.save(Some(&path_str)).unwrap();

        let loaded = Settings::load(Some(&path_str)).unwrap();
        assert_eq!(loaded.company.name, "Lusa Trading");
        std::fs::remove_file(&path).ok();
    }
}
