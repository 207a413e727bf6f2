//! The [`Endpoint`] trait ties a request type to its remote operation.

use crate::schema::InputSchema;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};

/// A request type bound to exactly one LeadMagic API operation.
///
/// The request is validated against [`Endpoint::schema`] before it is sent.
/// `GET` operations are sent without a body.
pub trait Endpoint: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Payload returned by a successful call.
    type Response: Serialize + DeserializeOwned + Send + 'static;

    const METHOD: Method;

    /// Path relative to the API base URL, without a leading slash.
    const PATH: &'static str;

    /// Accepted input parameters.
    fn schema() -> InputSchema;
}
