//! Trait for the outbound notification integration

use async_trait::async_trait;

/// Delivers verification secrets to the user
///
/// Both methods return the provider's message id on success and a
/// human-readable reason on failure.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Send the email verification link carrying `token`
    async fn send_email_verification(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<String, String>;

    /// Send the phone verification code by SMS
    async fn send_phone_code(&self, phone: &str, code: &str) -> Result<String, String>;
}
