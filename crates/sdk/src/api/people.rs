//! People API endpoints: roles and employees within a company.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{page_field, per_page_field, FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// People API for finding who works where.
pub struct PeopleApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> PeopleApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Find the person holding a role at a company.
    pub async fn find_role(&self, request: RoleFinderRequest) -> LeadMagicResult<RoleFinderResponse> {
        self.client.execute(&request).await
    }

    /// List employees of a company, one page at a time.
    pub async fn find_employees(
        &self,
        request: EmployeeFinderRequest,
    ) -> LeadMagicResult<EmployeeFinderResponse> {
        self.client.execute(&request).await
    }
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_per_page() -> u32 {
    20
}

// ── role finder ──

/// Request to find a role within a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleFinderRequest {
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_profile_url: Option<String>,
}

/// Person found for a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleFinderResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for RoleFinderRequest {
    type Response = RoleFinderResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "role-finder";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::required(
                "job_title",
                FieldKind::String,
                "Role to look for, e.g. 'Head of Sales'",
            ))
            .field(FieldSpec::optional(
                "company_name",
                FieldKind::String,
                "Company name",
            ))
            .field(FieldSpec::optional(
                "company_domain",
                FieldKind::String,
                "Company domain, e.g. acme.com",
            ))
            .field(FieldSpec::optional(
                "company_profile_url",
                FieldKind::Url,
                "Company profile URL",
            ))
            .at_least_one_of(&["company_name", "company_domain", "company_profile_url"])
    }
}

// ── employee finder ──

/// Request to list employees of a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFinderRequest {
    pub company_name: String,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl EmployeeFinderRequest {
    pub fn new(company_name: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// One page of employees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeFinderResponse {
    #[serde(default, alias = "data", deserialize_with = "lenient::or_default")]
    pub employees: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::or_default", skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for EmployeeFinderRequest {
    type Response = EmployeeFinderResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "employee-finder";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::required(
                "company_name",
                FieldKind::String,
                "Company name",
            ))
            .field(page_field())
            .field(per_page_field())
    }
}
