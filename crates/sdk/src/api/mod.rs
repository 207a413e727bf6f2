//! Typed API groups, one module per area of the LeadMagic API.

pub mod account;
pub mod ads;
pub mod companies;
pub mod emails;
pub mod jobs;
mod lenient;
pub mod people;
pub mod profiles;

pub use account::*;
pub use ads::*;
pub use companies::*;
pub use emails::*;
pub use jobs::*;
pub use people::*;
pub use profiles::*;
