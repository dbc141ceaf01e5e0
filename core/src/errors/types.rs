//! Error types for authentication, token handling and verification
//!
//! The display strings are the client-facing messages. The presentation
//! layer maps each variant onto an HTTP status.

use thiserror::Error;

use crate::domain::entities::verification::VerificationChannel;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Not authorized, token failed")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Account has been deactivated")]
    AccountInactive,

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },
}

/// Errors raised while issuing or checking verification secrets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// Wrong, expired, consumed and unknown secrets all collapse into this
    #[error("Invalid or expired verification code")]
    InvalidCode,

    #[error("Please wait {retry_after_seconds} seconds before requesting a new {channel} verification")]
    RateLimited {
        channel: VerificationChannel,
        retry_after_seconds: i64,
    },

    #[error("Your {channel} is already verified")]
    AlreadyVerified { channel: VerificationChannel },

    #[error("No phone number on file")]
    MissingPhone,

    #[error("Failed to send {channel} verification")]
    DispatchFailed {
        channel: VerificationChannel,
        reason: String,
    },
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Please include a valid email")]
    InvalidEmail,

    #[error("Please include a valid phone number in international format")]
    InvalidPhone,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}
