//! Notification Module
//!
//! Outbound email and SMS delivery for verification secrets.
//!
//! ## Providers
//!
//! - **Brevo**: transactional email over the Brevo REST API
//! - **HTTP SMS**: a generic JSON SMS gateway with RapidAPI style headers
//! - **Mock**: logs and records messages for development and tests
//!
//! [`VerificationNotifier`] combines one email and one SMS provider behind the
//! core `NotificationDispatcher` trait.

use async_trait::async_trait;
use std::sync::Arc;

use sf_shared::{NotificationConfig, NotificationProvider, VerificationConfig};

use crate::InfrastructureError;

pub mod brevo;
pub mod dispatcher;
pub mod http_sms;
pub mod mock;
pub mod templates;

pub use brevo::BrevoEmailSender;
pub use dispatcher::{NotifierSettings, VerificationNotifier};
pub use http_sms::HttpSmsSender;
pub use mock::{MockNotifier, SentMessage};


/// A rendered email ready to hand to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to_email: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email provider trait
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send an email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier for the accepted message
    /// * `Err(InfrastructureError)` - If the provider rejected the message
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// SMS provider trait
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send an SMS message to a phone number in E.164 format
    async fn send_sms(&self, phone_number: &str, message: &str)
        -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Build the notifier selected by configuration
///
/// With `NotificationProvider::Http`, a channel whose credentials are missing
/// falls back to the mock provider with a warning. When `strict` is set
/// (production), missing credentials are a configuration error instead.
pub fn create_notifier(
    notification: &NotificationConfig,
    verification: &VerificationConfig,
    strict: bool,
) -> Result<VerificationNotifier, InfrastructureError> {
    let settings = NotifierSettings::from_config(notification, verification);
    let mock = MockNotifier::new();

    if notification.provider == NotificationProvider::Mock {
        if strict {
            return Err(InfrastructureError::Config(
                "Mock notification provider is not allowed in production".to_string(),
            ));
        }
        tracing::info!(provider = "mock", "Notifications will be logged, not delivered");
        return Ok(VerificationNotifier::new(
            Arc::new(mock.clone()),
            Arc::new(mock),
            settings,
        ));
    }

    let email: Arc<dyn EmailSender> = if notification.email_is_configured() {
        Arc::new(BrevoEmailSender::from_config(notification)?)
    } else if strict {
        return Err(InfrastructureError::Config(
            "BREVO_API_KEY and BREVO_SENDER_EMAIL are required".to_string(),
        ));
    } else {
        tracing::warn!("Brevo credentials missing, using mock email provider");
        Arc::new(mock.clone())
    };

    let sms: Arc<dyn SmsSender> = if notification.sms_is_configured() {
        Arc::new(HttpSmsSender::from_config(notification)?)
    } else if strict {
        return Err(InfrastructureError::Config(
            "SMS_API_URL and SMS_API_KEY are required".to_string(),
        ));
    } else {
        tracing::warn!("SMS gateway credentials missing, using mock SMS provider");
        Arc::new(mock)
    };

    tracing::info!(
        email_provider = email.provider_name(),
        sms_provider = sms.provider_name(),
        "Notification providers configured"
    );

    Ok(VerificationNotifier::new(email, sms, settings))
}
