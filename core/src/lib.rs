//! # Storefront Core
//!
//! Core business logic and domain layer for the Storefront backend.
//! This crate contains the user entity, the verification and token services,
//! repository interfaces, and the error types shared by the outer layers.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
