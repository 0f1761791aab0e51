//! Processing service configuration
//!
//! Settings are stored as JSON. Values resolve in this order, later wins:
//! built-in defaults, config file, environment, command line.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default host of the meeting processing service
pub const DEFAULT_BASE_URL: &str = "https://meeting-processing-server.onrender.com";

/// Generation of a long recording can take minutes
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

pub const BASE_URL_ENV: &str = "MEETING_PROCESSING_BASE_URL";
pub const TIMEOUT_ENV: &str = "MEETING_PROCESSING_TIMEOUT_SECS";

/// Connection settings for the remote processing service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Base URL shared by every artifact endpoint
    pub base_url: String,

    /// Upper bound on a single generation request
    pub request_timeout_secs: u64,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ProcessingConfig {
    /// Parses a JSON settings document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded processing config from {}", path.display());
        Ok(config)
    }

    /// Applies overrides from the process environment
    pub fn apply_env_overrides(self) -> Result<Self> {
        self.apply_overrides(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_ENV).ok(),
        )
    }

    fn apply_overrides(mut self, base_url: Option<String>, timeout: Option<String>) -> Result<Self> {
        if let Some(base_url) = base_url.filter(|v| !v.trim().is_empty()) {
            log::debug!("{} overrides base URL", BASE_URL_ENV);
            self.base_url = base_url.trim().to_string();
        }

        if let Some(timeout) = timeout.filter(|v| !v.trim().is_empty()) {
            self.request_timeout_secs = timeout.trim().parse().map_err(|_| {
                AppError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
        }

        Ok(self)
    }

    /// Checks the settings are usable
    pub fn validate(&self) -> Result<()> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(AppError::Config("base_url must not be empty".to_string()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "base_url must be an http(s) URL, got {}",
                base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL without a trailing slash
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_defaults() {
        let config = ProcessingConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(300));
        assert_ok!(config.validate());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ProcessingConfig::from_json_str(r#"{"request_timeout_secs": 30}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let result = ProcessingConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "http://localhost:8080/", "request_timeout_secs": 12}}"#
        )
        .unwrap();

        let config = ProcessingConfig::load(file.path()).unwrap();
        assert_eq!(config.normalized_base_url(), "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessingConfig::load(dir.path().join("absent.json"));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let config = ProcessingConfig::default()
            .apply_overrides(Some("http://127.0.0.1:9000".to_string()), Some("45".to_string()))
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 45);

        // Blank values are ignored
        let config = ProcessingConfig::default()
            .apply_overrides(Some(" ".to_string()), None)
            .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        assert_err!(ProcessingConfig::default().apply_overrides(None, Some("soon".to_string())));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ProcessingConfig::default();
        config.base_url = "ftp://files".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = ProcessingConfig::default();
        config.base_url = String::new();
        assert!(config.validate().is_err());

        let mut config = ProcessingConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
