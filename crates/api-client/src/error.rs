//! Error types for the back-office API client.

use thiserror::Error;

/// Errors that can occur when talking to the back-office API.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// HTTP request failed (connect error, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Login rejected or token no longer accepted.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Error body shape used by the back-office API.
///
/// The server is inconsistent: validation failures come back as
/// `{"message": "..."}` while some handlers return `{"error": "..."}`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    /// Error message (`message` key).
    pub message: Option<String>,
    /// Error message (`error` key).
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best-effort extraction of a human-readable message from a raw body.
    pub(crate) fn extract(body: &str) -> String {
        match serde_json::from_str::<Self>(body) {
            Ok(parsed) => parsed
                .message
                .or(parsed.error)
                .unwrap_or_else(|| body.to_owned()),
            Err(_) => body.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiClientError::Api {
            status: 404,
            message: "Customer not found".to_string(),
        };
        assert_eq!(err.to_string(), "API error (404): Customer not found");
    }

    #[test]
    fn test_unauthorized_display() {
        let err = ApiClientError::Unauthorized("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "unauthorized: Invalid credentials");
    }

    #[test]
    fn test_error_body_message_key() {
        assert_eq!(
            ErrorBody::extract(r#"{"message": "Invalid credentials"}"#),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_error_body_error_key() {
        assert_eq!(
            ErrorBody::extract(r#"{"error": "Loan not found"}"#),
            "Loan not found"
        );
    }

    #[test]
    fn test_error_body_prefers_message_over_error() {
        assert_eq!(
            ErrorBody::extract(r#"{"message": "first", "error": "second"}"#),
            "first"
        );
    }

    #[test]
    fn test_error_body_falls_back_to_raw() {
        assert_eq!(ErrorBody::extract("<html>502</html>"), "<html>502</html>");
        assert_eq!(ErrorBody::extract(r#"{"ok": true}"#), r#"{"ok": true}"#);
    }
}
