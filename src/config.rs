//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the configured connection string.
pub const URI_ENV_VAR: &str = "MONGODB_URI";

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log: LogConfig,
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
    /// Server selection timeout in seconds (default: 5).
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
    /// TCP connect timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_server_selection_timeout_secs() -> u64 {
    5
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Write a daily rolling log file in addition to stderr.
    pub file_enabled: bool,
    pub directory: String,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let uri = self.database.resolved_uri();
        if uri.trim().is_empty() {
            return Err(ConfigError::Validation("Connection string cannot be empty".to_string()));
        }
        if !uri.starts_with("mongodb://") && !uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::Validation(
                "Connection string must start with mongodb:// or mongodb+srv://".to_string(),
            ));
        }
        if self.database.name.trim().is_empty() {
            return Err(ConfigError::Validation("Database name cannot be empty".to_string()));
        }
        if self.database.server_selection_timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Server selection timeout must be at least 1 second".to_string(),
            ));
        }
        if self.database.connect_timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Connect timeout must be at least 1 second".to_string(),
            ));
        }
        if self.log.file_enabled && self.log.directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Log directory cannot be empty when file logging is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl DatabaseConfig {
    /// Connection string, honoring the environment override.
    pub fn resolved_uri(&self) -> String {
        std::env::var(URI_ENV_VAR)
            .ok()
            .filter(|uri| !uri.trim().is_empty())
            .unwrap_or_else(|| self.uri.clone())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            name: "employeeDB".to_string(),
            server_selection_timeout_secs: default_server_selection_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            directory: "logs".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_name() {
        let mut config = AppConfig::default();
        config.database.name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_scheme() {
        let mut config = AppConfig::default();
        config.database.uri = "postgres://localhost:5432".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_timeout_bounds() {
        let mut config = AppConfig::default();

        config.database.server_selection_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.database.server_selection_timeout_secs = 5;
        config.database.connect_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.database.connect_timeout_secs = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_log_directory_required_when_enabled() {
        let mut config = AppConfig::default();
        config.log.file_enabled = true;
        config.log.directory = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_defaults_apply_when_omitted() {
        let config: AppConfig = toml::from_str(
            r#"
            [database]
            uri = "mongodb://db.example.com:27017"
            name = "employeeDB"

            [log]
            file_enabled = false
            directory = "logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.database.server_selection_timeout_secs, 5);
        assert_eq!(config.database.connect_timeout_secs, 10);
    }
}
