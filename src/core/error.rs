//! Error types for the Passgate SDK.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the Passgate SDK.
#[derive(Error, Debug)]
pub enum PassgateError {
    /// Payload could not be serialized for signing (local bug, fail fast)
    #[error("Encoding error: {message}")]
    Encoding {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Network-level failure (connection refused, DNS, broken transfer)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The fixed request timeout elapsed
    #[error("Timeout: operation timed out after {duration:?}")]
    Timeout {
        duration: Duration,
        operation: String,
    },

    /// The API rejected the request with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A success response body was not valid JSON or did not match the
    /// expected shape
    #[error("Decoding error: {message}")]
    Decoding {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid client configuration
    #[error("Config error: {message}")]
    Config { message: String },
}

impl PassgateError {
    /// Check if this error is worth retrying from the caller's side.
    ///
    /// The SDK itself never retries; this is advisory only.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => *status >= 500 && *status < 600,
            _ => false,
        }
    }

    /// HTTP status code, for API errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Convenience constructors
impl PassgateError {
    /// Create an encoding error with source.
    pub fn encoding_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Encoding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error with source.
    pub fn transport<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a transport error without source.
    pub fn transport_simple(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        Self::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a decoding error without source.
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
            source: None,
        }
    }

    /// Create a decoding error with source.
    pub fn decoding_with_source<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::Decoding {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for PassgateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                duration: Duration::from_secs(30),
                operation: "HTTP request".to_string(),
            }
        } else {
            Self::transport("HTTP request failed", err)
        }
    }
}

impl From<url::ParseError> for PassgateError {
    fn from(err: url::ParseError) -> Self {
        Self::config(format!("Invalid URL: {err}"))
    }
}

/// Result type alias for convenience.
pub type Result<T> = std::result::Result<T, PassgateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(PassgateError::transport_simple("connection refused").is_retryable());
        assert!(PassgateError::timeout(Duration::from_secs(30), "GET").is_retryable());
        assert!(PassgateError::api(503, "unavailable").is_retryable());
        assert!(!PassgateError::api(404, "not found").is_retryable());
        assert!(!PassgateError::decoding("bad body").is_retryable());
        assert!(!PassgateError::config("empty account id").is_retryable());
    }

    #[test]
    fn test_api_error_preserves_status_and_message() {
        let err = PassgateError::api(404, "not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "API error (404): not found");
    }
}
