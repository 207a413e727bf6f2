//! Email API endpoints: validation and discovery.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Email API for validating and discovering email addresses.
pub struct EmailsApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> EmailsApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Check deliverability of an email address.
    pub async fn validate(
        &self,
        request: EmailValidationRequest,
    ) -> LeadMagicResult<EmailValidationResponse> {
        self.client.execute(&request).await
    }

    /// Find a work email from a person's name and company.
    pub async fn find(&self, request: EmailFinderRequest) -> LeadMagicResult<EmailFinderResponse> {
        self.client.execute(&request).await
    }

    /// Find personal email addresses from a professional profile.
    pub async fn find_personal(
        &self,
        request: PersonalEmailRequest,
    ) -> LeadMagicResult<PersonalEmailResponse> {
        self.client.execute(&request).await
    }

    /// Find a work email from a professional profile.
    pub async fn find_work(&self, request: WorkEmailRequest) -> LeadMagicResult<WorkEmailResponse> {
        self.client.execute(&request).await
    }
}

/// Deliverability verdict for an email address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    Valid,
    ValidCatchAll,
    Invalid,
    CatchAll,
    /// Also used for any status this SDK does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::ValidCatchAll => "valid_catch_all",
            Self::Invalid => "invalid",
            Self::CatchAll => "catch_all",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── email validation ──

/// Request to validate an email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailValidationRequest {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl EmailValidationRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
        }
    }
}

/// Result of an email validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailValidationResponse {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub email_status: EmailStatus,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub is_domain_catch_all: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mx_provider: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for EmailValidationRequest {
    type Response = EmailValidationResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "email-validate";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::required(
                "email",
                FieldKind::Email,
                "Email address to validate",
            ))
            .field(FieldSpec::optional(
                "first_name",
                FieldKind::String,
                "First name of the mailbox owner",
            ))
            .field(FieldSpec::optional(
                "last_name",
                FieldKind::String,
                "Last name of the mailbox owner",
            ))
    }
}

// ── email finder ──

/// Request to find an email from a name and company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailFinderRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Outcome status of an email search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailFinderStatus {
    Valid,
    ValidCatchAll,
    NotFound,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Result of an email search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailFinderResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub status: EmailFinderStatus,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EmailFinderResponse {
    /// The discovered email, only when the search actually found one.
    ///
    /// A `not_found` status never yields an email, even if the payload
    /// carries a stray value.
    pub fn found_email(&self) -> Option<&str> {
        match self.status {
            EmailFinderStatus::NotFound => None,
            _ => self.email.as_deref().filter(|e| !e.is_empty()),
        }
    }
}

impl Endpoint for EmailFinderRequest {
    type Response = EmailFinderResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "email-finder";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::required(
                "first_name",
                FieldKind::String,
                "First name of the person",
            ))
            .field(FieldSpec::required(
                "last_name",
                FieldKind::String,
                "Last name of the person",
            ))
            .field(FieldSpec::optional(
                "domain",
                FieldKind::String,
                "Company domain, e.g. acme.com",
            ))
            .field(FieldSpec::optional(
                "company_name",
                FieldKind::String,
                "Company name",
            ))
            .at_least_one_of(&["domain", "company_name"])
    }
}

// ── personal email finder ──

/// Request to find personal emails from a profile URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalEmailRequest {
    pub profile_url: String,
}

/// Personal emails found for a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalEmailResponse {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub personal_emails: Vec<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for PersonalEmailRequest {
    type Response = PersonalEmailResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "personal-email-finder";

    fn schema() -> InputSchema {
        InputSchema::new().field(FieldSpec::required(
            "profile_url",
            FieldKind::Url,
            "Professional profile URL",
        ))
    }
}

// ── work email from profile ──

/// Request to find a work email from a profile URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkEmailRequest {
    pub profile_url: String,
}

/// Work email found for a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEmailResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub email_status: Option<EmailStatus>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for WorkEmailRequest {
    type Response = WorkEmailResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "b2b-social-email";

    fn schema() -> InputSchema {
        InputSchema::new().field(FieldSpec::required(
            "profile_url",
            FieldKind::Url,
            "Professional profile URL",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_status_values() {
        for (raw, status) in [
            ("valid", EmailStatus::Valid),
            ("valid_catch_all", EmailStatus::ValidCatchAll),
            ("invalid", EmailStatus::Invalid),
            ("catch_all", EmailStatus::CatchAll),
            ("unknown", EmailStatus::Unknown),
            ("something_new", EmailStatus::Unknown),
        ] {
            let parsed: EmailStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(parsed, status, "{raw}");
        }
    }

    #[test]
    fn test_found_email_respects_not_found() {
        let response: EmailFinderResponse = serde_json::from_value(json!({
            "email": "john@acme.com",
            "status": "not_found",
            "credits_consumed": 0
        }))
        .unwrap();
        assert_eq!(response.found_email(), None);

        let response: EmailFinderResponse = serde_json::from_value(json!({
            "email": "john@acme.com",
            "status": "valid",
            "credits_consumed": 1
        }))
        .unwrap();
        assert_eq!(response.found_email(), Some("john@acme.com"));
    }

    #[test]
    fn test_finder_requires_name_and_company_hint() {
        let schema = EmailFinderRequest::schema();

        assert!(schema
            .validate(&json!({"first_name": "John", "last_name": "Doe", "company_name": "Acme"}))
            .is_ok());
        assert!(schema
            .validate(&json!({"first_name": "John", "last_name": "Doe"}))
            .is_err());
        assert!(schema
            .validate(&json!({"first_name": "John", "domain": "acme.com"}))
            .is_err());
    }

    #[test]
    fn test_validation_request_omits_absent_names() {
        let body = serde_json::to_value(EmailValidationRequest::new("john@example.com")).unwrap();
        assert_eq!(body, json!({"email": "john@example.com"}));
    }

    #[test]
    fn test_response_keeps_unknown_fields() {
        let response: EmailValidationResponse = serde_json::from_value(json!({
            "email": "john@example.com",
            "email_status": "valid",
            "credits_consumed": 0.05,
            "mx_record": "mx.example.com"
        }))
        .unwrap();

        assert_eq!(response.extra["mx_record"], json!("mx.example.com"));
        let round = serde_json::to_value(&response).unwrap();
        assert_eq!(round["mx_record"], json!("mx.example.com"));
        assert_eq!(round["email_status"], json!("valid"));
    }
}
