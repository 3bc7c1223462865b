//! Configuration management for Mailflow.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/mailflow/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Platform API connection settings
    pub api: ApiConfig,
    /// Notification polling settings for tracked operations
    pub polling: PollingConfig,
    /// AI content generation settings
    pub generation: GenerationConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `MAILFLOW_API_BASE_URL`: Override the platform API base URL
    /// - `MAILFLOW_API_TOKEN`: Override the API bearer token
    /// - `MAILFLOW_POLL_INTERVAL_SECS`: Override the notification poll interval
    /// - `MAILFLOW_POLL_MAX_ATTEMPTS`: Override the poll attempt limit
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("MAILFLOW_API_BASE_URL") {
            if !val.is_empty() {
                tracing::debug!("Override api.base_url from env");
                config.api.base_url = val;
            }
        }

        if let Ok(val) = std::env::var("MAILFLOW_API_TOKEN") {
            if !val.is_empty() {
                config.api.api_token = Some(val);
                tracing::debug!("Override api.api_token from env");
            }
        }

        if let Ok(val) = std::env::var("MAILFLOW_POLL_INTERVAL_SECS") {
            if let Ok(secs) = val.parse() {
                config.polling.interval_secs = secs;
                tracing::debug!("Override polling.interval_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("MAILFLOW_POLL_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                config.polling.max_attempts = attempts;
                tracing::debug!("Override polling.max_attempts from env: {}", attempts);
            }
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/mailflow/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "mailflow", "mailflow").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Platform API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the campaign platform API
    pub base_url: String,
    /// Bearer token for API authentication (usually set via env, not file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mailflow.app/v1".to_string(),
            api_token: None,
            timeout_secs: 30,
        }
    }
}

/// Notification polling settings for tracked operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between notification feed polls
    pub interval_secs: u64,
    /// Poll attempts before a pending operation is treated as failed.
    /// The default bounds polling at roughly three minutes.
    pub max_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_attempts: 36,
        }
    }
}

/// AI content generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Whether AI-assisted content generation is enabled
    pub enabled: bool,
    /// Default tone for generated copy: "formal", "friendly", or "concise"
    pub default_tone: String,
    /// Maximum tokens for generated content
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_tone: "friendly".to_string(),
            max_tokens: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "https://api.mailflow.app/v1");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.polling.interval_secs, 5);
        assert_eq!(config.polling.max_attempts, 36);
        assert!(config.generation.enabled);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[polling]"));
        assert!(toml_str.contains("[generation]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        // Create a custom config
        let mut config = AppConfig::default();
        config.api.base_url = "https://staging.mailflow.app/v1".to_string();
        config.polling.max_attempts = 12;

        // Save
        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        // Load
        let loaded_contents = fs::read_to_string(&config_path).expect("read config file");
        let loaded: AppConfig = toml::from_str(&loaded_contents).expect("parse loaded config");

        assert_eq!(loaded.api.base_url, "https://staging.mailflow.app/v1");
        assert_eq!(loaded.polling.max_attempts, 12);
    }

    #[test]
    fn test_partial_config() {
        // Partial TOML configs fill the rest from defaults
        let toml_str = r#"
[polling]
interval_secs = 2
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.polling.interval_secs, 2);
        // These should be defaults
        assert_eq!(config.polling.max_attempts, 36);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_token_not_serialized_when_absent() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(!toml_str.contains("api_token"));
    }
}
