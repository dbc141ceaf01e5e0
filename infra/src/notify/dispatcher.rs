//! Adapter from the provider traits to the core `NotificationDispatcher`

use async_trait::async_trait;
use std::sync::Arc;

use sf_core::services::NotificationDispatcher;
use sf_shared::{NotificationConfig, VerificationConfig};

use super::{templates, EmailSender, SmsSender};

/// Values the message templates need
#[derive(Debug, Clone)]
pub struct NotifierSettings {
    /// Public base URL used in verification links
    pub app_base_url: String,
    /// Email token lifetime shown to the user
    pub email_expiry_minutes: i64,
    /// Phone code lifetime shown to the user
    pub phone_expiry_minutes: i64,
}

impl NotifierSettings {
    pub fn from_config(notification: &NotificationConfig, verification: &VerificationConfig) -> Self {
        Self {
            app_base_url: notification.app_base_url.clone(),
            email_expiry_minutes: verification.email_token_expiry_minutes,
            phone_expiry_minutes: verification.phone_code_expiry_minutes,
        }
    }
}

impl Default for NotifierSettings {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default(), &VerificationConfig::default())
    }
}

/// Renders verification messages and hands them to the configured providers
#[derive(Clone)]
pub struct VerificationNotifier {
    email: Arc<dyn EmailSender>,
    sms: Arc<dyn SmsSender>,
    settings: NotifierSettings,
}

impl VerificationNotifier {
    pub fn new(
        email: Arc<dyn EmailSender>,
        sms: Arc<dyn SmsSender>,
        settings: NotifierSettings,
    ) -> Self {
        Self {
            email,
            sms,
            settings,
        }
    }

    pub fn email_provider(&self) -> &str {
        self.email.provider_name()
    }

    pub fn sms_provider(&self) -> &str {
        self.sms.provider_name()
    }
}

#[async_trait]
impl NotificationDispatcher for VerificationNotifier {
    async fn send_email_verification(
        &self,
        email: &str,
        name: &str,
        token: &str,
    ) -> Result<String, String> {
        let message = templates::verification_email(
            email,
            name,
            &self.settings.app_base_url,
            token,
            self.settings.email_expiry_minutes,
        );

        self.email
            .send_email(&message)
            .await
            .map_err(|e| e.to_string())
    }

    async fn send_phone_code(&self, phone: &str, code: &str) -> Result<String, String> {
        let body = templates::verification_sms(code, self.settings.phone_expiry_minutes);

        self.sms
            .send_sms(phone, &body)
            .await
            .map_err(|e| e.to_string())
    }
}
