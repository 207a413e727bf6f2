//! Jobs API endpoints.

use crate::api::people::{default_page, default_per_page};
use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{page_field, per_page_field, FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Accepted `experience_level` filter values.
pub const EXPERIENCE_LEVELS: &[&str] = &[
    "internship",
    "entry_level",
    "associate",
    "mid_senior_level",
    "director",
    "executive",
];

/// Jobs API for searching job postings and reference data.
pub struct JobsApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> JobsApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Search job postings.
    pub async fn search(&self, request: JobsSearchRequest) -> LeadMagicResult<JobsSearchResponse> {
        self.client.execute(&request).await
    }

    /// List countries supported by the job search.
    pub async fn countries(&self) -> LeadMagicResult<JobCountriesResponse> {
        self.client.execute(&JobCountriesRequest::default()).await
    }

    /// List job types supported by the job search.
    pub async fn types(&self) -> LeadMagicResult<JobTypesResponse> {
        self.client.execute(&JobTypesRequest::default()).await
    }
}

// ── job search ──

/// Job search filters. All filters are optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobsSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for JobsSearchRequest {
    fn default() -> Self {
        Self {
            company_name: None,
            company_website: None,
            job_title: None,
            job_description: None,
            location: None,
            country_id: None,
            job_type_id: None,
            experience_level: None,
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

/// One page of job postings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsSearchResponse {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub jobs: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total_count: u64,
    #[serde(default = "default_page", deserialize_with = "lenient::or_default")]
    pub page: u32,
    #[serde(default = "default_per_page", deserialize_with = "lenient::or_default")]
    pub per_page: u32,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobsSearchResponse {
    /// Page count implied by `total_count` and `per_page`.
    pub fn expected_total_pages(&self) -> u64 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(self.per_page))
    }

    /// Whether `total_pages` agrees with `total_count` and `per_page`.
    pub fn is_pagination_consistent(&self) -> bool {
        self.total_pages == self.expected_total_pages()
    }
}

impl Endpoint for JobsSearchRequest {
    type Response = JobsSearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "jobs-finder";

    fn schema() -> InputSchema {
        InputSchema::new()
            .field(FieldSpec::optional(
                "company_name",
                FieldKind::String,
                "Hiring company name",
            ))
            .field(FieldSpec::optional(
                "company_website",
                FieldKind::String,
                "Hiring company website or domain",
            ))
            .field(FieldSpec::optional(
                "job_title",
                FieldKind::String,
                "Job title keywords",
            ))
            .field(FieldSpec::optional(
                "job_description",
                FieldKind::String,
                "Keywords that must appear in the job description",
            ))
            .field(FieldSpec::optional(
                "location",
                FieldKind::String,
                "City, region or country of the job",
            ))
            .field(FieldSpec::optional(
                "country_id",
                FieldKind::String,
                "Country identifier from get_job_countries",
            ))
            .field(FieldSpec::optional(
                "job_type_id",
                FieldKind::String,
                "Job type identifier from get_job_types",
            ))
            .field(FieldSpec::optional(
                "experience_level",
                FieldKind::Enum(EXPERIENCE_LEVELS),
                "Seniority filter",
            ))
            .field(page_field())
            .field(per_page_field())
    }
}

// ── reference data ──

/// Request for the supported job-search countries. Sent as GET without a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobCountriesRequest {}

/// Supported job-search countries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCountriesResponse {
    #[serde(default, alias = "data", deserialize_with = "lenient::or_default")]
    pub countries: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for JobCountriesRequest {
    type Response = JobCountriesResponse;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "job-country";

    fn schema() -> InputSchema {
        InputSchema::new()
    }
}

/// Request for the supported job types. Sent as GET without a body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTypesRequest {}

/// Supported job types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTypesResponse {
    #[serde(default, alias = "data", deserialize_with = "lenient::or_default")]
    pub job_types: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for JobTypesRequest {
    type Response = JobTypesResponse;
    const METHOD: Method = Method::GET;
    const PATH: &'static str = "job-types";

    fn schema() -> InputSchema {
        InputSchema::new()
    }
}
