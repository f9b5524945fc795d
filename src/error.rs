//! Error types for txfeed

use std::time::Duration;
use thiserror::Error;

/// Result type alias for txfeed operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    /// A request parameter that must never reach the backend, such as the
    /// "all employees" sentinel id.
    #[error("Invalid request signature: {0}")]
    InvalidSignature(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// Failures of the backend fetch capability.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed. Check `api_key` in your txfeed config.")]
    Unauthorized,

    #[error("Access denied. You don't have permission to access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("API host not configured. Pass --api-host or set `api_host` in ~/.txfeed/config.yaml.")]
    MissingApiHost,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unauthorized_message() {
        let err = ApiError::Unauthorized;
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_api_error_not_found() {
        let err = ApiError::NotFound("/employees".to_string());
        assert!(err.to_string().contains("/employees"));
    }

    #[test]
    fn test_api_error_rate_limit() {
        let err = ApiError::RateLimit(Duration::from_secs(30));
        let msg = err.to_string();
        assert!(msg.contains("Rate limit"));
        assert!(msg.contains("30"));
    }

    #[test]
    fn test_api_error_network() {
        let err = ApiError::Network("Connection refused".to_string());
        assert!(err.to_string().contains("Connection refused"));
    }

    #[test]
    fn test_api_error_invalid_response() {
        let err = ApiError::InvalidResponse("missing field `data`".to_string());
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_config_error_missing_host() {
        let err = ConfigError::MissingApiHost;
        assert!(err.to_string().contains("--api-host"));
    }

    #[test]
    fn test_config_error_not_found_names_path() {
        let err = ConfigError::NotFound("/tmp/nope.yaml".to_string());
        assert!(err.to_string().contains("/tmp/nope.yaml"));
    }

    #[test]
    fn test_invalid_signature_message() {
        let err = Error::InvalidSignature("empty employee id".to_string());
        assert!(err.to_string().contains("empty employee id"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Forbidden.into();

        match err {
            Error::Api(ApiError::Forbidden) => (),
            _ => panic!("Expected Error::Api(ApiError::Forbidden)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::MissingApiHost.into();

        match err {
            Error::Config(ConfigError::MissingApiHost) => (),
            _ => panic!("Expected Error::Config(ConfigError::MissingApiHost)"),
        }
    }

    #[test]
    fn test_config_error_from_yaml_error() {
        let yaml_str = "invalid: [yaml: content";
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let config_err: ConfigError = yaml_err.into();

        match config_err {
            ConfigError::ParseError(_) => (),
            _ => panic!("Expected ConfigError::ParseError"),
        }
    }
}
