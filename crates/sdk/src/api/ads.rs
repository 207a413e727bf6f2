//! Advertising intelligence endpoints.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::{FieldKind, FieldSpec, InputSchema};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ads API for paid-search, paid-social and B2B ad lookups.
pub struct AdsApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> AdsApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Paid-search ads run by a company.
    pub async fn google(&self, request: GoogleAdsRequest) -> LeadMagicResult<AdSearchResponse> {
        self.client.execute(&request).await
    }

    /// Paid-social ads run by a company.
    pub async fn meta(&self, request: MetaAdsRequest) -> LeadMagicResult<AdSearchResponse> {
        self.client.execute(&request).await
    }

    /// B2B ad campaigns run by a company.
    pub async fn b2b(&self, request: B2bAdsRequest) -> LeadMagicResult<AdSearchResponse> {
        self.client.execute(&request).await
    }

    /// Details of a single B2B ad.
    pub async fn b2b_details(&self, request: B2bAdDetailsRequest) -> LeadMagicResult<B2bAdDetailsResponse> {
        self.client.execute(&request).await
    }
}

fn ad_search_schema() -> InputSchema {
    InputSchema::new()
        .field(FieldSpec::optional(
            "company_domain",
            FieldKind::String,
            "Advertiser domain, e.g. acme.com",
        ))
        .field(FieldSpec::optional(
            "company_name",
            FieldKind::String,
            "Advertiser company name",
        ))
        .at_least_one_of(&["company_domain", "company_name"])
}

/// Ads found for a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdSearchResponse {
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub ads: Vec<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Paid-search ad lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoogleAdsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Endpoint for GoogleAdsRequest {
    type Response = AdSearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "google/searchads";

    fn schema() -> InputSchema {
        ad_search_schema()
    }
}

/// Paid-social ad lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaAdsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Endpoint for MetaAdsRequest {
    type Response = AdSearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "meta/searchads";

    fn schema() -> InputSchema {
        ad_search_schema()
    }
}

/// B2B ad campaign lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct B2bAdsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl Endpoint for B2bAdsRequest {
    type Response = AdSearchResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "b2b/searchads";

    fn schema() -> InputSchema {
        ad_search_schema()
    }
}

/// B2B ad detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct B2bAdDetailsRequest {
    pub ad_id: String,
}

/// Details of one B2B ad.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct B2bAdDetailsResponse {
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub ad_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(default, deserialize_with = "lenient::opt_string", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for B2bAdDetailsRequest {
    type Response = B2bAdDetailsResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "b2b/ad-details";

    fn schema() -> InputSchema {
        InputSchema::new().field(FieldSpec::required(
            "ad_id",
            FieldKind::String,
            "Ad identifier returned by search_b2b_ads",
        ))
    }
}
