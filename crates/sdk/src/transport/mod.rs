//! Transport layer for the LeadMagic SDK.

pub mod http;

pub use http::HttpTransport;
