use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::VerificationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Verification token is required"))]
    pub token: String,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuccessResponse {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }
}

/// Answer to an email or SMS (re)send request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationResponse {
    pub success: bool,
    pub message: String,
    /// Seconds until another request will be accepted
    pub resend_available_in: i64,
    /// Issued secret, only outside production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerificationStatusResponse {
    pub email_verified: bool,
    pub can_resend_email: bool,
    pub resend_available_in: i64,
}

impl From<&VerificationStatus> for EmailVerificationStatusResponse {
    fn from(status: &VerificationStatus) -> Self {
        Self {
            email_verified: status.email_verified,
            can_resend_email: status.can_resend_email,
            resend_available_in: status.email_resend_available_in,
        }
    }
}
