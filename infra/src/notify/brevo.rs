//! Brevo transactional email

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use sf_shared::email::mask_email;
use sf_shared::NotificationConfig;

use super::{EmailMessage, EmailSender};
use crate::InfrastructureError;

pub const BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoEmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BrevoSendEmailBody {
    pub sender: BrevoEmailAddress,
    pub to: Vec<BrevoEmailAddress>,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrevoSendEmailResponse {
    message_id: Option<String>,
}

/// Email sender backed by the Brevo REST API
pub struct BrevoEmailSender {
    client: reqwest::Client,
    api_key: String,
    sender_email: String,
    sender_name: Option<String>,
    endpoint: String,
}

impl BrevoEmailSender {
    /// Create a sender with explicit credentials
    pub fn new(
        api_key: impl Into<String>,
        sender_email: impl Into<String>,
        sender_name: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            sender_email: sender_email.into(),
            sender_name,
            endpoint: BREVO_API_URL.to_string(),
        })
    }

    /// Create a sender from notification configuration
    pub fn from_config(config: &NotificationConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .brevo_api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("BREVO_API_KEY is required".to_string()))?;
        let sender_email = config.sender_email.clone().ok_or_else(|| {
            InfrastructureError::Config("BREVO_SENDER_EMAIL is required".to_string())
        })?;

        Self::new(
            api_key,
            sender_email,
            config.sender_name.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub(crate) fn build_body(&self, message: &EmailMessage) -> BrevoSendEmailBody {
        BrevoSendEmailBody {
            sender: BrevoEmailAddress {
                email: self.sender_email.clone(),
                name: self.sender_name.clone(),
            },
            to: vec![BrevoEmailAddress {
                email: message.to_email.clone(),
                name: message.to_name.clone(),
            }],
            subject: message.subject.clone(),
            html_content: message.html.clone(),
            text_content: message.text.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for BrevoEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to_email);

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .header("Accept", "application/json")
            .json(&self.build_body(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "brevo",
                to = %masked,
                status = status.as_u16(),
                "Brevo rejected the email"
            );
            return Err(InfrastructureError::Email(format!(
                "Brevo send failed (status={}): {}",
                status.as_u16(),
                body
            )));
        }

        // A missing messageId still means the message was accepted
        let message_id = response
            .json::<BrevoSendEmailResponse>()
            .await
            .ok()
            .and_then(|r| r.message_id)
            .unwrap_or_else(|| format!("brevo_{}", uuid::Uuid::new_v4()));

        info!(
            provider = "brevo",
            to = %masked,
            message_id = %message_id,
            "Email sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Brevo"
    }
}
