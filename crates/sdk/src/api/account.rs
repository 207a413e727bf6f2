//! Account API endpoints.

use crate::api::lenient;
use crate::client::LeadMagicClient;
use crate::endpoint::Endpoint;
use crate::error::LeadMagicResult;
use crate::schema::InputSchema;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Account API for checking the credit balance.
pub struct AccountApi<'a> {
    client: &'a LeadMagicClient,
}

impl<'a> AccountApi<'a> {
    pub(crate) fn new(client: &'a LeadMagicClient) -> Self {
        Self { client }
    }

    /// Get the remaining credit balance. This is a pure read.
    pub async fn credits(&self) -> LeadMagicResult<CreditsResponse> {
        self.client.execute(&CreditsRequest::default()).await
    }
}

/// Request for the credit balance. Takes no parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditsRequest {}

/// Credit balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditsResponse {
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub credits_consumed: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint for CreditsRequest {
    type Response = CreditsResponse;
    const METHOD: Method = Method::POST;
    const PATH: &'static str = "credits";

    fn schema() -> InputSchema {
        InputSchema::new()
    }
}
