//! # LeadMagic SDK
//!
//! Typed Rust client for the LeadMagic B2B data-enrichment API.
//!
//! Every request type implements [`Endpoint`], which binds it to one remote
//! operation and declares its [`InputSchema`]. Requests are validated
//! against their schema before anything is sent, and every failure is
//! reported as a classified [`LeadMagicError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use leadmagic_sdk::{EmailValidationRequest, LeadMagicClient, LeadMagicError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = LeadMagicClient::builder()
//!         .api_key("lm-your-api-key")
//!         .build()?;
//!
//!     let balance = client.account().credits().await?;
//!     println!("Credits left: {}", balance.credits);
//!
//!     match client
//!         .emails()
//!         .validate(EmailValidationRequest::new("john@example.com"))
//!         .await
//!     {
//!         Ok(result) => println!("{} is {}", result.email, result.email_status),
//!         Err(e @ LeadMagicError::Validation { .. }) => eprintln!("bad input: {e}"),
//!         Err(e) => eprintln!("{} error: {e}", e.kind()),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod schema;
pub mod transport;

// Re-export main client
pub use client::{LeadMagicClient, LeadMagicClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoint::Endpoint;
pub use error::{ConfigError, ErrorKind, LeadMagicError, LeadMagicResult};
pub use schema::{FieldIssue, FieldKind, FieldSpec, InputSchema};

// Re-export request and response types
pub use api::{
    // Account
    CreditsRequest, CreditsResponse,
    // Emails
    EmailFinderRequest, EmailFinderResponse, EmailFinderStatus, EmailStatus,
    EmailValidationRequest, EmailValidationResponse, PersonalEmailRequest, PersonalEmailResponse,
    WorkEmailRequest, WorkEmailResponse,
    // Profiles
    EmailToProfileRequest, EmailToProfileResponse, MobileFinderRequest, MobileFinderResponse,
    ProfileSearchRequest, ProfileSearchResponse,
    // Companies
    CompanyFundingRequest, CompanyFundingResponse, CompanySearchRequest, CompanySearchResponse,
    // People
    EmployeeFinderRequest, EmployeeFinderResponse, RoleFinderRequest, RoleFinderResponse,
    // Jobs
    JobCountriesRequest, JobCountriesResponse, JobTypesRequest, JobTypesResponse,
    JobsSearchRequest, JobsSearchResponse, EXPERIENCE_LEVELS,
    // Ads
    AdSearchResponse, B2bAdDetailsRequest, B2bAdDetailsResponse, B2bAdsRequest, GoogleAdsRequest,
    MetaAdsRequest,
};
