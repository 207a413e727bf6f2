//! Error types for the LeadMagic SDK.

use crate::schema::FieldIssue;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;

/// Result type for SDK operations.
pub type LeadMagicResult<T> = Result<T, LeadMagicError>;

/// Errors produced by an API call.
///
/// Every failure path of a call ends up in exactly one of these variants.
/// Validation errors are raised before any network I/O; everything else is
/// produced by the HTTP transport's error transform.
#[derive(Debug, thiserror::Error)]
pub enum LeadMagicError {
    /// Request parameters failed schema validation. No request was sent.
    #[error("Validation failed: {}", join_issues(.issues))]
    Validation { issues: Vec<FieldIssue> },

    /// The API answered with a 4xx status.
    #[error("API error (status {status}): {message}")]
    Client {
        status: u16,
        code: String,
        message: String,
        details: Option<Value>,
    },

    /// The API answered with a 5xx status.
    #[error("Server error (status {status}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
        details: Option<Value>,
    },

    /// No response was received (DNS, refused connection, timeout).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Anything that could not be classified.
    #[error("Unexpected error: {message}")]
    Unknown { message: String },
}

/// Coarse classification of a [`LeadMagicError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Client,
    Server,
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Client => "client",
            Self::Server => "server",
            Self::Network => "network",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN_ERROR";
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";

impl LeadMagicError {
    /// Build a validation error for a single field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            issues: vec![FieldIssue::new(field, message)],
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Client { .. } => ErrorKind::Client,
            Self::Server { .. } => ErrorKind::Server,
            Self::Network { .. } => ErrorKind::Network,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// HTTP status of the failure. Validation errors report 400; network and
    /// unknown errors report the sentinel 0.
    pub fn status(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Client { status, .. } | Self::Server { status, .. } => *status,
            Self::Network { .. } | Self::Unknown { .. } => 0,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            Self::Validation { .. } => VALIDATION_ERROR_CODE,
            Self::Client { code, .. } | Self::Server { code, .. } => code,
            Self::Network { .. } => NETWORK_ERROR_CODE,
            Self::Unknown { .. } => UNKNOWN_ERROR_CODE,
        }
    }

    /// Human-readable message without the classification prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { issues } => join_issues(issues),
            Self::Client { message, .. }
            | Self::Server { message, .. }
            | Self::Network { message }
            | Self::Unknown { message } => message.clone(),
        }
    }

    /// Raw error payload returned by the API, if it was JSON.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Client { details, .. } | Self::Server { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Client { status: 401, .. })
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Client { status: 429, .. })
    }

    /// Check if this error is retryable.
    ///
    /// The client never retries on its own; this is for callers that do.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Client { status, .. } => *status == 429,
            Self::Server { .. } => true,
            Self::Validation { .. } | Self::Unknown { .. } => false,
        }
    }

    /// Create an API error from a non-success status code and response body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        let details = serde_json::from_str::<Value>(body)
            .ok()
            .filter(Value::is_object);

        let field = |name: &str| -> Option<String> {
            details
                .as_ref()
                .and_then(|d| d.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let message = field("message").or_else(|| field("error")).unwrap_or(fallback);
        let code = field("error").or_else(|| field("code"));
        let status_code = status.as_u16();

        if status.is_client_error() {
            Self::Client {
                status: status_code,
                code: code.unwrap_or_else(|| "API_ERROR".to_string()),
                message,
                details,
            }
        } else if status.is_server_error() {
            Self::Server {
                status: status_code,
                code: code.unwrap_or_else(|| "SERVER_ERROR".to_string()),
                message,
                details,
            }
        } else {
            Self::Unknown {
                message: format!("Unexpected HTTP status {}: {}", status_code, message),
            }
        }
    }
}

impl From<reqwest::Error> for LeadMagicError {
    fn from(err: reqwest::Error) -> Self {
        // Strip the URL so nothing request-specific leaks into messages.
        let err = err.without_url();
        if err.is_timeout() {
            Self::network(format!("Request timed out: {}", err))
        } else if err.is_connect() || err.is_request() {
            Self::network(format!("No response received: {}", err))
        } else if err.is_decode() {
            Self::unknown(format!("Failed to decode response: {}", err))
        } else {
            Self::unknown(err.to_string())
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised while building a client. These are startup failures, not
/// per-call errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported base URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_uses_json_fields() {
        let body = json!({"error": "INVALID_EMAIL", "message": "Email is malformed"}).to_string();
        let err = LeadMagicError::from_response(StatusCode::BAD_REQUEST, &body);

        assert_eq!(err.kind(), ErrorKind::Client);
        assert_eq!(err.status(), 400);
        assert_eq!(err.code(), "INVALID_EMAIL");
        assert_eq!(err.message(), "Email is malformed");
        assert!(err.details().is_some());
    }

    #[test]
    fn test_from_response_falls_back_to_status_text() {
        let err = LeadMagicError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");

        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.code(), "SERVER_ERROR");
        assert_eq!(err.message(), "Bad Gateway");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_from_response_error_only_body() {
        let body = json!({"error": "Unauthorized"}).to_string();
        let err = LeadMagicError::from_response(StatusCode::UNAUTHORIZED, &body);

        assert!(err.is_authentication());
        assert_eq!(err.message(), "Unauthorized");
        assert_eq!(err.code(), "Unauthorized");
    }

    #[test]
    fn test_rate_limit_is_retryable_client_error() {
        let err = LeadMagicError::from_response(StatusCode::TOO_MANY_REQUESTS, "");

        assert_eq!(err.kind(), ErrorKind::Client);
        assert!(err.is_rate_limited());
        assert!(err.is_retryable());
        assert_eq!(err.message(), "Too Many Requests");
    }

    #[test]
    fn test_network_sentinel() {
        let err = LeadMagicError::network("connection refused");

        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.status(), 0);
        assert_eq!(err.code(), NETWORK_ERROR_CODE);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_validation_error_message_names_fields() {
        let err = LeadMagicError::Validation {
            issues: vec![
                FieldIssue::new("email", "is required"),
                FieldIssue::new("per_page", "must be at most 50"),
            ],
        };

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(!err.is_retryable());
        let text = err.to_string();
        assert!(text.contains("email: is required"));
        assert!(text.contains("per_page: must be at most 50"));
    }

    #[test]
    fn test_redirect_status_is_unknown() {
        let err = LeadMagicError::from_response(StatusCode::NOT_MODIFIED, "");
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.status(), 0);
    }
}
