//! Profile API endpoints.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile API for person lookups.
pub struct ProfilesApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> ProfilesApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Get a professional profile by URL.
    pub async fn search(&self, request: ProfileSearchRequest) -> LeadMagicResult<ProfileSearchResponse> {
        self.client.execute(&request).await
    }

    /// Find the profile behind a work email.
    pub async fn from_email(
        &self,
        request: EmailToProfileRequest,
    ) -> LeadMagicResult<EmailToProfileResponse> {
        self.client.execute(&request).await
    }

    /// Find a mobile number from a profile or an email.
    pub async fn find_mobile(&self, request: MobileFinderRequest) -> LeadMagicResult<MobileFinderResponse> {
        self.client.execute(&request).await
    }
}

// ── profile search ──

/// Request to look up a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSearchRequest {
    pub profile_url: String,
}

/// Profile details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSearchResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub professional_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for ProfileSearchRequest {
    type Response = ProfileSearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "profile-search";

    fn schema() -> InputSchema {
        InputSchema::new().field(FieldSpec::required(
            "profile_url",
            FieldKind::Url,
            "Professional profile URL, e.g. https://www.linkedin.com/in/username",
        ))
    }
}

// ── email to profile ──

/// Request to find the profile behind a work email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailToProfileRequest {
    pub work_email: String,
}

/// Profile found for a work email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailToProfileResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for EmailToProfileRequest {
    type Response = EmailToProfileResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "b2b-profile";

    fn schema() -> InputSchema {
        InputSchema::new().field(FieldSpec::required(
            "work_email",
            FieldKind::Email,
            "Work email address",
        ))
    }
}

// ── mobile finder ──

/// Request to find a mobile number. Any combination of identifiers works.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MobileFinderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_email: Option<String>,
}

/// Mobile number found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MobileFinderResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for MobileFinderRequest {
    type Response = MobileFinderResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "mobile-finder";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::optional(
                "profile_url",
                FieldKind::Url,
                "Professional profile URL",
            ))
            .field(FieldSpec::optional(
                "work_email",
                FieldKind::Email,
                "Work email address",
            ))
            .field(FieldSpec::optional(
                "personal_email",
                FieldKind::Email,
                "Personal email address",
            ))
            .at_least_one_of(&["profile_url", "work_email", "personal_email"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mobile_finder_needs_an_identifier() {
        let schema = MobileFinderRequest::schema();

        assert!(schema.validate(&json!({})).is_err());
        assert!(schema.validate(&json!({"work_email": "jane@acme.com"})).is_ok());
        assert!(schema
            .validate(&json!({
                "profile_url": "https://www.linkedin.com/in/jane",
                "personal_email": "jane@gmail.com"
            }))
            .is_ok());
        assert!(schema.validate(&json!({"work_email": "not-an-email"})).is_err());
    }

    #[test]
    fn test_profile_search_requires_url() {
        let schema = ProfileSearchRequest::schema();

        assert!(schema.validate(&json!({"profile_url": "linkedin"})).is_err());
        assert!(schema
            .validate(&json!({"profile_url": "https://www.linkedin.com/in/jane"}))
            .is_ok());
    }
}
