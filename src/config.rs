//! Configuration module for QuickChat.

use serde::Deserialize;
use std::path::Path;

use crate::message::{ReloadPolicy, DEFAULT_SENDER};
use crate::{QuickChatError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/quickchat.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Message store persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON file holding saved messages.
    #[serde(default = "default_store_path")]
    pub path: String,
    /// Discard saved message IDs and generate fresh ones on load.
    #[serde(default = "default_regenerate_ids")]
    pub regenerate_ids_on_load: bool,
}

fn default_store_path() -> String {
    "data/messages.json".to_string()
}

fn default_regenerate_ids() -> bool {
    true
}

impl StorageConfig {
    /// Reload policy selected by this configuration.
    pub fn reload_policy(&self) -> ReloadPolicy {
        if self.regenerate_ids_on_load {
            ReloadPolicy::Regenerate
        } else {
            ReloadPolicy::Preserve
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            regenerate_ids_on_load: default_regenerate_ids(),
        }
    }
}

/// Messaging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Sender name stamped on newly composed messages.
    #[serde(default = "default_sender")]
    pub default_sender: String,
}

fn default_sender() -> String {
    DEFAULT_SENDER.to_string()
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            default_sender: default_sender(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Messaging configuration.
    #[serde(default)]
    pub messaging: MessagingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(QuickChatError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| QuickChatError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `QUICKCHAT_STORE_PATH`: Override the message store path
    /// - `QUICKCHAT_LOG_LEVEL`: Override the log level
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("QUICKCHAT_STORE_PATH") {
            if !path.is_empty() {
                self.storage.path = path;
            }
        }
        if let Ok(level) = std::env::var("QUICKCHAT_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the store path or default sender is blank.
    pub fn validate(&self) -> Result<()> {
        if self.storage.path.trim().is_empty() {
            return Err(QuickChatError::Config(
                "storage.path must not be empty".to_string(),
            ));
        }
        if self.messaging.default_sender.trim().is_empty() {
            return Err(QuickChatError::Config(
                "messaging.default_sender must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/quickchat.log");
        assert_eq!(config.storage.path, "data/messages.json");
        assert!(config.storage.regenerate_ids_on_load);
        assert_eq!(config.storage.reload_policy(), ReloadPolicy::Regenerate);
        assert_eq!(config.messaging.default_sender, "You");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[logging]
level = "debug"
file = "custom/logs/chat.log"

[storage]
path = "custom/store.json"
regenerate_ids_on_load = false

[messaging]
default_sender = "Kyle"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/chat.log");
        assert_eq!(config.storage.path, "custom/store.json");
        assert_eq!(config.storage.reload_policy(), ReloadPolicy::Preserve);
        assert_eq!(config.messaging.default_sender, "Kyle");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[storage]
path = "elsewhere.json"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.storage.path, "elsewhere.json");
        assert!(config.storage.regenerate_ids_on_load);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.messaging.default_sender, "You");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.storage.path, "data/messages.json");
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = Config::parse("[storage\npath = ");
        assert!(matches!(result, Err(QuickChatError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_store_path() {
        let mut config = Config::default();
        config.storage.path = "  ".to_string();
        assert!(matches!(config.validate(), Err(QuickChatError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_sender() {
        let mut config = Config::default();
        config.messaging.default_sender = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/quickchat/config.toml");
        assert!(matches!(result, Err(QuickChatError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_env_overrides() {
        let saved: Vec<(&str, Option<String>)> = ["QUICKCHAT_STORE_PATH", "QUICKCHAT_LOG_LEVEL"]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();

        std::env::set_var("QUICKCHAT_STORE_PATH", "/tmp/quickchat/override.json");
        std::env::set_var("QUICKCHAT_LOG_LEVEL", "trace");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.storage.path, "/tmp/quickchat/override.json");
        assert_eq!(config.logging.level, "trace");

        std::env::set_var("QUICKCHAT_STORE_PATH", "");
        std::env::remove_var("QUICKCHAT_LOG_LEVEL");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.storage.path, "data/messages.json");
        assert_eq!(config.logging.level, "info");

        for (key, value) in saved {
            match value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}
