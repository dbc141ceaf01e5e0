//! Request and response bodies
//!
//! All JSON field names are camelCase to match the storefront client.

pub mod auth;
pub mod verification;

pub use auth::*;
pub use verification::*;
