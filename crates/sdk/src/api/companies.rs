//! Company API endpoints.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Company API for firmographic and funding lookups.
pub struct CompaniesApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> CompaniesApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Look up a company by domain, name or profile URL.
    pub async fn search(&self, request: CompanySearchRequest) -> LeadMagicResult<CompanySearchResponse> {
        self.client.execute(&request).await
    }

    /// Get funding, financials and competitors of a company.
    pub async fn funding(&self, request: CompanyFundingRequest) -> LeadMagicResult<CompanyFundingResponse> {
        self.client.execute(&request).await
    }
}

fn company_lookup_schema() -> InputSchema {
    InputSchema::new()
        .field(FieldSpec::optional(
            "company_domain",
            FieldKind::String,
            "Company domain, e.g. acme.com",
        ))
        .field(FieldSpec::optional(
            "company_name",
            FieldKind::String,
            "Company name",
        ))
        .field(FieldSpec::optional(
            "profile_url",
            FieldKind::Url,
            "Company profile URL",
        ))
        .at_least_one_of(&["company_domain", "company_name", "profile_url"])
}

// ── company search ──

/// Request to look up a company. Any combination of identifiers works.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanySearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

/// Company details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanySearchResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for CompanySearchRequest {
    type Response = CompanySearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "company-search";

    fn schema() -> InputSchema {
        company_lookup_schema()
    }
}

// ── company funding ──

/// Request for company funding intelligence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyFundingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

/// Funding, financial and competitor data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyFundingResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_funding: Option<Value>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub competitors: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for CompanyFundingRequest {
    type Response = CompanyFundingResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "company-funding";

    fn schema() -> InputSchema {
        company_lookup_schema()
    }
}
