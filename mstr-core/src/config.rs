//! SDK configuration management.
//!
//! Handles loading, saving, and accessing SDK configuration: server base
//! URL, authorization token, timeouts, and logging preferences.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{MstrError, MstrResult};

/// Top-level SDK configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server base URL (e.g. "https://bi.example.com:8443/MicroStrategyLibrary").
    #[serde(default)]
    pub base_url: String,

    /// Authorization token sent on every request.
    #[serde(default)]
    pub auth_token: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// Whether to accept self-signed SSL certificates from the server.
    #[serde(default)]
    pub accept_self_signed_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, logging is console-only.
    #[serde(default)]
    pub directory: String,
}

// Default value functions for serde

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth_token: String::new(),
            api_timeout_ms: default_api_timeout(),
            accept_self_signed_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
        }
    }
}

impl SdkConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> MstrResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> MstrResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: SdkConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> MstrResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| MstrError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> MstrResult<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| MstrError::Config("no config directory on this platform".into()))?;
        Ok(dir.join("mstr-sdk").join("config.toml"))
    }

    /// Check whether the server connection is configured.
    pub fn is_server_configured(&self) -> bool {
        !self.server.base_url.is_empty() && !self.server.auth_token.is_empty()
    }
}

impl ServerConfig {
    /// Sanitize and normalize a server base URL.
    ///
    /// Ensures the URL has a scheme and strips trailing slashes so endpoint
    /// paths can be appended directly.
    pub fn sanitize_base_url(base_url: &str) -> String {
        let trimmed = base_url.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.server.api_timeout_ms, 30_000);
        assert_eq!(config.logging.level, "info");
        assert!(!config.is_server_configured());
    }

    #[test]
    fn test_sanitize_base_url() {
        assert_eq!(
            ServerConfig::sanitize_base_url("bi.example.com:8443"),
            "https://bi.example.com:8443"
        );
        assert_eq!(
            ServerConfig::sanitize_base_url("http://192.168.1.100:8080/"),
            "http://192.168.1.100:8080"
        );
        assert_eq!(
            ServerConfig::sanitize_base_url("  \"https://example.com/\"  "),
            "https://example.com"
        );
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut config = SdkConfig::default();
        config.server.base_url = "https://bi.example.com".into();
        config.server.auth_token = "token".into();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        config.save_to_file(&path).unwrap();

        let loaded = SdkConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.base_url, config.server.base_url);
        assert!(loaded.is_server_configured());
    }
}
