//! Authentication service module
//!
//! This module provides the account side of the storefront:
//! - Registration with initial verification issuance
//! - Email and password login
//! - Session token resolution for the HTTP auth gate

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::{AuthOutcome, AuthService, Authenticator, DevCodes, RegisterInput};
