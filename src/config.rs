//! Configuration for the wrench client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;

use url::Url;

use crate::error::WrenchError;

/// Default base URL of the hosted MyRepairApp service.
pub const DEFAULT_BASE_URL: &str = "https://www.myrepairapp.com";

/// Configuration for connecting to MyRepairApp.
///
/// The API key is required and loaded from the environment. The base URL
/// defaults to the hosted service and only needs overriding for testing
/// or self-hosted deployments. The key is stored but never logged or
/// exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL for the service (e.g. `https://www.myrepairapp.com`).
    pub base_url: String,

    /// API key for authentication.
    /// This value must never be logged or included in error messages.
    pub api_key: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MRA_API_KEY` (required): the API key for authentication
    /// - `MRA_BASE_URL` (optional): overrides the hosted service URL
    ///
    /// # Errors
    ///
    /// Returns `WrenchError::Config` if the API key is missing or if
    /// values fail validation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let config = Config::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, WrenchError> {
        let api_key = Self::get_required_env("MRA_API_KEY")?;
        let base_url = env::var("MRA_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url, api_key)
    }

    /// Creates a configuration from explicit values, applying the same
    /// validation as [`Config::from_env`].
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, WrenchError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        let api_key = api_key.into();
        Self::validate_api_key(&api_key)?;

        Ok(Config { base_url, api_key })
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, WrenchError> {
        env::var(name)
            .map_err(|_| WrenchError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(WrenchError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, WrenchError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url)
            .map_err(|e| WrenchError::invalid_config(format!("MRA_BASE_URL is invalid: {}", e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(WrenchError::invalid_config(
                "MRA_BASE_URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Validates the API key is not a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), WrenchError> {
        let key_lower = key.to_lowercase();
        let placeholder_patterns = [
            "your_api_key",
            "your_key",
            "placeholder",
            "xxx",
            "changeme",
        ];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(WrenchError::invalid_config(
                    "MRA_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: Tests that modify environment variables should not run in parallel.
    // Config::new is used below to keep validation tests env-free.

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = Config::validate_base_url("https://example.com/".to_string()).unwrap();
        assert_eq!(result, "https://example.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        let result = Config::validate_base_url("example.com".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_base_url_rejects_non_http_scheme() {
        let result = Config::validate_base_url("ftp://example.com".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_api_key_rejects_placeholder() {
        let result = Config::validate_api_key("your_api_key_here");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_api_key_accepts_real_key() {
        let result = Config::validate_api_key("abc123def456");
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_applies_validation() {
        let config = Config::new("https://shop.example.com/", "abc123").unwrap();
        assert_eq!(config.base_url, "https://shop.example.com");

        assert!(Config::new("not a url", "abc123").is_err());
        assert!(Config::new("https://shop.example.com", "changeme").is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::new("https://shop.example.com", "abc123def456").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("abc123def456"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
