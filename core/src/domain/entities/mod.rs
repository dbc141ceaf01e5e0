//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use token::{Claims, LegacyUserClaim, TOKEN_EXPIRY_DAYS};
pub use user::{User, UserRole};
pub use verification::{
    SecretCheck, VerificationChannel, EMAIL_TOKEN_EXPIRATION_MINUTES, EMAIL_TOKEN_LENGTH,
    PHONE_CODE_EXPIRATION_MINUTES, PHONE_CODE_LENGTH, RESEND_COOLDOWN_SECONDS,
};
