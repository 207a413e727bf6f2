//! MCP (Model Context Protocol) server exposing the LeadMagic enrichment API.
//!
//! Each LeadMagic operation is registered as a tool whose input schema is
//! derived from the SDK's request schema. Tool calls are validated, sent
//! through one shared [`leadmagic_sdk::LeadMagicClient`] and rendered as
//! text results by [`format`].

pub mod config;
pub mod format;
pub mod protocol;
pub mod server;
pub mod tools;

pub use config::McpConfig;
pub use server::McpServer;
