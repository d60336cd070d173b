/*
[INPUT]:  Error sources (HTTP transport, API status codes, serialization)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the todo API adapter
#[derive(Error, Debug)]
pub enum TodoApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The addressed task does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The server rejected the request body
    #[error("Validation failed: {message}")]
    Validation { message: String },

    /// API returned any other error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoApiError {
    /// Map a non-success status code onto an error variant
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::NOT_FOUND => TodoApiError::NotFound { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                TodoApiError::Validation { message }
            }
            _ => TodoApiError::Api {
                code: status.as_u16(),
                message,
            },
        }
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            TodoApiError::Http(_) => true,
            TodoApiError::Api { code, .. } => *code >= 500,
            _ => false,
        }
    }
}

/// Result type alias for todo API operations
pub type Result<T> = std::result::Result<T, TodoApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let server_err = TodoApiError::from_status(StatusCode::BAD_GATEWAY, "upstream");
        assert!(server_err.is_retryable());

        let missing = TodoApiError::from_status(StatusCode::NOT_FOUND, "");
        assert!(!missing.is_retryable());
        assert!(matches!(missing, TodoApiError::NotFound { .. }));
    }

    #[test]
    fn test_validation_statuses() {
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY] {
            match TodoApiError::from_status(status, "title is required") {
                TodoApiError::Validation { message } => assert_eq!(message, "title is required"),
                other => panic!("Expected Validation variant, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_api_error_creation() {
        let err = TodoApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        match err {
            TodoApiError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "boom");
            }
            _ => panic!("Expected Api error variant"),
        }
    }
}
