//! Error types for the wrench client.
//!
//! This module defines `WrenchError`, the unified error type used throughout
//! the crate. HTTP status codes returned by MyRepairApp map onto dedicated
//! variants (see [`crate::shop_client`]); enum-validation failures during
//! JSON conversion map onto [`WrenchError::InvalidEnum`].
//!
//! # Security
//!
//! All error messages are sanitized to ensure API keys are never leaked
//! in logs or error responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all wrench operations.
///
/// HTTP-level faults (`Forbidden`, `MethodNotAllowed`, `BadRequest`,
/// `InternalServerError`) are raised to the immediate caller and never
/// retried. Rate limiting (HTTP 429) is retried internally and only
/// surfaces as `TooManyRequests` once the retry budget is exhausted.
#[derive(Error, Debug)]
pub enum WrenchError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Transport-level failure: the request never produced an HTTP response.
    #[error("failed to reach MyRepairApp: {0} - check network connectivity and MRA_BASE_URL")]
    Transport(#[source] reqwest::Error),

    /// Credential rejected (HTTP 401).
    #[error("this action is not allowed - are you using the correct API key?")]
    Forbidden,

    /// Operation not allowed on this resource (HTTP 405).
    #[error("this action is not allowed on this resource")]
    MethodNotAllowed,

    /// The service rejected the request (HTTP 400, or 500 on the update
    /// path), with the decoded error payload attached.
    #[error("MyRepairApp rejected the request: {payload}")]
    BadRequest {
        /// Decoded JSON error body returned by the service.
        payload: serde_json::Value,
    },

    /// The service failed internally (HTTP 500).
    #[error(
        "MyRepairApp responded with status code 500 - it may be down for \
         maintenance, or something went wrong internally"
    )]
    InternalServerError,

    /// Rate limited (HTTP 429) and the retry budget is exhausted.
    #[error("too many requests - gave up after {attempts} attempts")]
    TooManyRequests {
        /// How many times the request was attempted before giving up.
        attempts: u32,
    },

    /// The service returned a status code outside the documented set.
    #[error("unexpected HTTP {status}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// A wire string did not match any member of a domain enum.
    #[error("{value:?} is not a valid {family}")]
    InvalidEnum {
        /// The offending input string.
        value: String,
        /// The enum family that rejected it (e.g. "condition", "part type").
        family: &'static str,
    },

    /// The requested record kind cannot be updated through the API yet.
    #[error("updating a {kind} is not supported yet")]
    UnsupportedUpdate {
        /// Human-readable record kind (e.g. "checkin ticket").
        kind: String,
    },
}

impl WrenchError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        WrenchError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        WrenchError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        WrenchError::Validation(message.into())
    }

    /// Creates a validation fault for a wire string that matches no member
    /// of the given enum family.
    pub fn invalid_enum(value: impl Into<String>, family: &'static str) -> Self {
        WrenchError::InvalidEnum {
            value: value.into(),
            family,
        }
    }

    /// Creates an unsupported-update fault for the given record kind.
    pub fn unsupported_update(kind: impl Into<String>) -> Self {
        WrenchError::UnsupportedUpdate { kind: kind.into() }
    }

    /// Returns the HTTP status this fault corresponds to, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            WrenchError::Forbidden => Some(StatusCode::UNAUTHORIZED),
            WrenchError::MethodNotAllowed => Some(StatusCode::METHOD_NOT_ALLOWED),
            WrenchError::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
            WrenchError::InternalServerError => Some(StatusCode::INTERNAL_SERVER_ERROR),
            WrenchError::TooManyRequests { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            WrenchError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this fault was raised while converting JSON into a
    /// domain object (as opposed to during the HTTP exchange).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WrenchError::InvalidEnum { .. } | WrenchError::Serialization(_)
        )
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }
}
