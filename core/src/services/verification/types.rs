//! Types for verification service results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::verification::VerificationChannel;

/// Result of issuing a verification secret
#[derive(Debug, Clone)]
pub struct IssueResult {
    /// Channel the secret was issued on
    pub channel: VerificationChannel,
    /// When the issued secret stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the user can request another secret
    pub next_resend_at: DateTime<Utc>,
    /// Provider message id, absent when dispatch failed in dev mode
    pub message_id: Option<String>,
    /// The raw secret, only populated in dev mode
    pub dev_code: Option<String>,
}

/// Verification state of a user as reported to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationStatus {
    pub email_verified: bool,
    pub phone_verified: bool,
    pub can_resend_email: bool,
    pub can_resend_phone: bool,
    /// Seconds until another verification email may be sent
    pub email_resend_available_in: i64,
    /// Seconds until another verification SMS may be sent
    pub phone_resend_available_in: i64,
}
