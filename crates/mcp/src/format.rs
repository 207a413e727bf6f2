//! Rendering of tool results for MCP clients.
//!
//! Success results carry a one-line summary, the credit cost and the full
//! payload. Error results carry the classification, status and code, and
//! guidance on what to do next.

use crate::protocol::CallToolResult;
use anyhow::{Context, Result};
use leadmagic_sdk::LeadMagicError;
use serde_json::Value;
use std::borrow::Cow;

const REDACTED: &str = "[REDACTED]";

/// Keys shorter than this are not searched for; they would match ordinary text.
const MIN_SECRET_LEN: usize = 8;

/// Format a successful API payload. The payload is rendered as received.
pub fn success(summary: &str, payload: &Value) -> Result<CallToolResult> {
    let credits = match payload.get("credits_consumed") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "0".to_string(),
    };
    let pretty =
        serde_json::to_string_pretty(payload).context("Failed to render API response")?;

    Ok(CallToolResult::text(format!(
        "{}\nCredits consumed: {}\n\n{}",
        summary, credits, pretty
    )))
}

/// Format a failed call.
///
/// `secret` is removed from the parts that come from the API response.
pub fn error(tool: &str, err: &LeadMagicError, secret: &str) -> CallToolResult {
    let mut text = format!(
        "Error ({}) in {}: {}\nStatus: {} | Code: {}\nGuidance: {}",
        err.kind(),
        tool,
        redact(&err.message(), secret),
        err.status(),
        redact(err.code(), secret),
        guidance(err)
    );
    if let Some(details) = err.details() {
        if let Ok(pretty) = serde_json::to_string_pretty(details) {
            text.push_str("\n\nResponse body:\n");
            text.push_str(&redact(&pretty, secret));
        }
    }
    CallToolResult::error(text)
}

/// What the caller should do about `err`.
pub fn guidance(err: &LeadMagicError) -> &'static str {
    match err {
        LeadMagicError::Validation { .. } => {
            "Check the required parameters and their formats, then call the tool again."
        }
        LeadMagicError::Client { status, .. } => match status {
            400 | 422 => "Check the required parameters and their formats, then call the tool again.",
            401 => "Authentication failed. Check that LEADMAGIC_API_KEY is set to a valid API key.",
            402 => "Not enough credits. Check the balance with check_credits and top up the account.",
            403 => "The API key is not allowed to use this endpoint. Check the account plan and permissions.",
            404 => "No matching record was found. Try different or additional identifiers.",
            429 => "Rate limited. Slow down and retry after a short pause; this error is retryable.",
            _ => "The request was rejected. Review the parameters and the error message.",
        },
        LeadMagicError::Server { .. } => {
            "The LeadMagic service had a problem. Retry later; this error is retryable."
        }
        LeadMagicError::Network { .. } => {
            "No response was received. Check network connectivity and LEADMAGIC_BASE_URL, then retry."
        }
        LeadMagicError::Unknown { .. } => {
            "An unexpected error occurred. Retry, and report the problem if it persists."
        }
    }
}

/// Replace every occurrence of `secret` in `text`.
pub fn redact<'a>(text: &'a str, secret: &str) -> Cow<'a, str> {
    if secret.len() < MIN_SECRET_LEN || !text.contains(secret) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace(secret, REDACTED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadmagic_sdk::FieldIssue;
    use serde_json::json;

    fn client_error(status: u16) -> LeadMagicError {
        LeadMagicError::Client {
            status,
            code: "API_ERROR".to_string(),
            message: "rejected".to_string(),
            details: None,
        }
    }

    #[test]
    fn test_success_layout() {
        let payload = json!({"email": "john@example.com", "credits_consumed": 1});
        let result = success("Email john@example.com is valid", &payload).unwrap();

        assert!(!result.is_error);
        let text = result.text_content();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Email john@example.com is valid"));
        assert_eq!(lines.next(), Some("Credits consumed: 1"));
        assert!(text.contains("\"email\": \"john@example.com\""));
    }

    #[test]
    fn test_error_guidance_by_class() {
        let cases = [
            (client_error(400), "required parameters"),
            (client_error(401), "API key"),
            (client_error(429), "Rate limited"),
            (
                LeadMagicError::Server {
                    status: 502,
                    code: "SERVER_ERROR".to_string(),
                    message: "bad gateway".to_string(),
                    details: None,
                },
                "Retry later",
            ),
            (LeadMagicError::network("refused"), "connectivity"),
            (LeadMagicError::unknown("boom"), "unexpected"),
            (
                LeadMagicError::Validation {
                    issues: vec![FieldIssue::new("email", "is required")],
                },
                "required parameters",
            ),
        ];

        for (err, expected) in cases {
            let result = error("validate_email", &err, "lm-test-key");
            assert!(result.is_error);
            let text = result.text_content();
            assert!(text.contains(expected), "{text}");
            assert!(text.contains(&format!("Code: {}", err.code())));
        }
    }

    #[test]
    fn test_error_header_names_tool_and_kind() {
        let result = error(
            "find_email",
            &LeadMagicError::network("connection refused"),
            "lm-test-key",
        );
        let text = result.text_content();

        assert!(text.starts_with("Error (network) in find_email: connection refused"));
        assert!(text.contains("Status: 0 | Code: NETWORK_ERROR"));
    }

    #[test]
    fn test_error_includes_response_body() {
        let err = LeadMagicError::Client {
            status: 400,
            code: "BAD_REQUEST".to_string(),
            message: "missing domain".to_string(),
            details: Some(json!({"error": "BAD_REQUEST", "message": "missing domain"})),
        };
        let text = error("find_email", &err, "lm-test-key").text_content();
        assert!(text.contains("Response body:"));
    }

    #[test]
    fn test_success_renders_payload_as_received() {
        let payload = json!({
            "data": [{"name": "x"}],
            "total_count": 1,
            "credits_consumed": 1,
            "note": null
        });
        let text = success("Found 1 employee(s)", &payload)
            .unwrap()
            .text_content();

        assert!(text.contains("Credits consumed: 1\n"));
        let (_, body) = text.split_once("\n\n").unwrap();
        assert_eq!(serde_json::from_str::<Value>(body).unwrap(), payload);
    }

    #[test]
    fn test_error_redacts_secret_from_api_text() {
        let err = LeadMagicError::Client {
            status: 401,
            code: "API_ERROR".to_string(),
            message: "key lm-secret-key rejected".to_string(),
            details: Some(json!({"message": "key lm-secret-key rejected"})),
        };
        let text = error("check_credits", &err, "lm-secret-key").text_content();

        assert!(!text.contains("lm-secret-key"));
        assert!(text.contains(REDACTED));
        assert!(text.starts_with("Error (client) in check_credits: key [REDACTED] rejected"));
    }

    #[test]
    fn test_short_secret_leaves_text_intact() {
        let text = error("check_credits", &LeadMagicError::unknown("bad"), "k").text_content();
        assert!(text.starts_with("Error (unknown) in check_credits: bad"));
        assert_eq!(redact("unknown", "k"), "unknown");
    }
}
