//! Token service module for JWT management
//!
//! Session tokens are HS256-signed and carry the user identifier plus
//! issue and expiry times. There is no refresh flow; a token lives until
//! it expires.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::{IssuedToken, TokenService};
