/// Application configuration
///
/// Read from `<config_dir>/movie-catalog/config.json` (e.g.
/// ~/.config/movie-catalog/config.json on Linux). Every field has a default,
/// so a missing file or a partial file is fine. `MOVIE_CATALOG_DB` and
/// `MOVIE_CATALOG_LOG` override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

const DB_ENV: &str = "MOVIE_CATALOG_DB";
const LOG_ENV: &str = "MOVIE_CATALOG_LOG";

/// Window theme
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog database file; the user data directory is used when unset
    pub database_path: Option<PathBuf>,

    /// tracing filter directive (e.g. "info", "movie_catalog=debug")
    pub log_filter: String,

    pub theme: ThemeChoice,

    /// Background of highlighted rows as RGB bytes
    pub highlight_color: [u8; 3],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            log_filter: "info".to_string(),
            theme: ThemeChoice::Dark,
            highlight_color: [0xC9, 0xA2, 0x27],
        }
    }
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let json = std::fs::read_to_string(&path)?;
                Self::from_json(&json)?
            }
            // First run: write the defaults so there is a file to edit
            Some(path) => {
                let config = Self::default();
                config.save(&path)?;
                config
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `MOVIE_CATALOG_DB` / `MOVIE_CATALOG_LOG` if set
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(std::env::var(DB_ENV).ok(), std::env::var(LOG_ENV).ok());
    }

    /// Location of the config file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("movie-catalog");
        path.push("config.json");
        Some(path)
    }

    /// Apply environment-style overrides; empty values are ignored
    pub fn apply_overrides(&mut self, database_path: Option<String>, log_filter: Option<String>) {
        if let Some(path) = database_path.filter(|p| !p.is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(filter) = log_filter.filter(|f| !f.is_empty()) {
            self.log_filter = filter;
        }
    }

    /// Write the config as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "theme": "light" }"#).unwrap();

        assert_eq!(config.theme, ThemeChoice::Light);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.database_path, None);
    }

    #[test]
    fn test_serialization() {
        let mut config = AppConfig::default();
        config.database_path = Some(PathBuf::from("/tmp/catalog.db"));
        config.highlight_color = [10, 20, 30];

        let json = config.to_json().unwrap();
        let restored = AppConfig::from_json(&json).unwrap();

        assert_eq!(config, restored);
    }

    #[test]
    fn test_save_writes_readable_file() {
        let path = std::env::temp_dir()
            .join(format!("movie-catalog-config-{}", std::process::id()))
            .join("config.json");
        let mut config = AppConfig::default();
        config.theme = ThemeChoice::Light;

        config.save(&path).unwrap();
        let restored = AppConfig::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let _ = std::fs::remove_dir_all(path.parent().unwrap());

        assert_eq!(restored, config);
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();

        config.apply_overrides(Some(String::new()), Some("debug".to_string()));
        assert_eq!(config.database_path, None);
        assert_eq!(config.log_filter, "debug");

        config.apply_overrides(Some("movies.db".to_string()), None);
        assert_eq!(config.database_path, Some(PathBuf::from("movies.db")));
        assert_eq!(config.log_filter, "debug");
    }
}
