//! Configuration management for txfeed

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::client::http::DEFAULT_REQUESTS_PER_SECOND;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the transactions backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Client-side request budget
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_requests_per_second() -> u32 {
    DEFAULT_REQUESTS_PER_SECOND
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".txfeed").join("config.yaml"))
    }

    /// Load configuration from an explicit path, or from the default path.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Resolve the backend host, preferring a command-line value.
    pub fn resolve_api_host(&self, flag: Option<&str>) -> Result<String> {
        let host = flag
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::MissingApiHost)?;

        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api_host must start with http:// or https://, got '{}'",
                host
            ))
            .into());
        }
        Ok(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_host.is_none());
        assert!(config.api_key.is_none());
        assert_eq!(config.preferences.requests_per_second, 10);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            "api_host: http://localhost:3000\napi_key: secret\npreferences:\n  format: json\n",
        );

        let config = Config::load_at(Some(file.path())).unwrap();

        assert_eq!(config.api_host.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.preferences.format.as_deref(), Some("json"));
        assert_eq!(config.preferences.requests_per_second, 10);
    }

    #[test]
    fn test_missing_explicit_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        let err = Config::load_at(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("api_host: [unterminated");

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_flag_overrides_file_host() {
        let config = Config {
            api_host: Some("http://file:3000".to_string()),
            ..Config::default()
        };

        assert_eq!(
            config.resolve_api_host(Some("http://flag:4000")).unwrap(),
            "http://flag:4000"
        );
        assert_eq!(config.resolve_api_host(None).unwrap(), "http://file:3000");
    }

    #[test]
    fn test_missing_host() {
        let err = Config::default().resolve_api_host(None).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingApiHost)));

        let err = Config::default().resolve_api_host(Some("  ")).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::MissingApiHost)));
    }

    #[test]
    fn test_host_without_scheme_is_invalid() {
        let err = Config::default()
            .resolve_api_host(Some("localhost:3000"))
            .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }
}
