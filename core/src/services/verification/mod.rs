//! Verification service module for email and phone ownership checks
//!
//! This module provides the complete verification workflow:
//! - Secret generation, persistence and dispatch
//! - Per-channel resend cooldowns
//! - One-time, expiring secret checks
//! - Development fallback codes when no provider is reachable

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::NotificationDispatcher;
pub use types::{IssueResult, VerificationStatus};
