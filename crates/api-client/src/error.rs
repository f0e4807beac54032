//! Error types for the API client

use serde_json::Value;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API returned a non-success status
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Message from the body, or the raw body text
        message: String,
        /// Parsed response body, when it was JSON
        body: Option<Value>,
    },

    /// Response parsed but did not have the expected shape
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// Invalid URL or path segment
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Session store failure
    #[error(transparent)]
    Session(#[from] masakin_core::Error),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an API response error from a status and raw body text
    pub fn api_response(status: u16, text: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(text).ok();
        let message = body
            .as_ref()
            .and_then(body_message)
            .map(str::to_string)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    text.to_string()
                }
            });
        Self::ApiResponse {
            status,
            message,
            body,
        }
    }

    /// Create an unexpected-shape error
    pub fn unexpected_shape(msg: impl Into<String>) -> Self {
        Self::UnexpectedShape(msg.into())
    }

    /// HTTP status, if a response was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The `message` field the backend put in its error body
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::ApiResponse { body: Some(body), .. } => body_message(body),
            _ => None,
        }
    }

    /// Message to show a user: the backend's message, else `fallback`
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// Whether the backend rejected the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Whether the backend could not be reached at all
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Request(e) if e.is_connect() || e.is_timeout())
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

fn body_message(body: &Value) -> Option<&str> {
    body.get("message")
        .or_else(|| body.get("error").and_then(|e| e.get("message")))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_reads_body_message() {
        let err = ApiError::api_response(400, r#"{"success":false,"message":"Email already used"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("Email already used"));
        assert_eq!(err.user_message("Registration failed"), "Email already used");
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_api_response_nested_error_message() {
        let err = ApiError::api_response(422, r#"{"error":{"message":"title is required"}}"#);
        assert_eq!(err.server_message(), Some("title is required"));
    }

    #[test]
    fn test_api_response_plain_text_body() {
        let err = ApiError::api_response(502, "Bad Gateway");
        assert!(err.server_message().is_none());
        assert_eq!(err.user_message("Try again"), "Try again");
        assert_eq!(err.to_string(), "API error (502): Bad Gateway");
        assert!(err.is_server_error());
    }

    #[test]
    fn test_api_response_empty_body() {
        let err = ApiError::api_response(401, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "API error (401): HTTP 401");
    }
}
