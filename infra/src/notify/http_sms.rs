//! Generic HTTP SMS gateway
//!
//! Posts `{"to": "+15551234567", "text": "..."}` as JSON to the configured
//! endpoint. Authentication uses RapidAPI style headers, which most hosted
//! SMS gateways accept.

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

use sf_shared::phone::mask_phone_number;
use sf_shared::NotificationConfig;

use super::SmsSender;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
pub(crate) struct SmsRequestBody<'a> {
    pub to: &'a str,
    pub text: &'a str,
}

/// SMS sender for a JSON HTTP gateway
pub struct HttpSmsSender {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    api_host: Option<String>,
}

impl HttpSmsSender {
    /// Create a sender with explicit gateway settings
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_host: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_host,
        })
    }

    /// Create a sender from notification configuration
    pub fn from_config(config: &NotificationConfig) -> Result<Self, InfrastructureError> {
        let endpoint = config
            .sms_api_url
            .clone()
            .ok_or_else(|| InfrastructureError::Config("SMS_API_URL is required".to_string()))?;
        let api_key = config
            .sms_api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("SMS_API_KEY is required".to_string()))?;

        Self::new(
            endpoint,
            api_key,
            config.sms_api_host.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }
}

/// Validate and normalize a phone number to E.164 format
pub fn to_e164(phone: &str) -> Result<String, InfrastructureError> {
    let trimmed = phone.trim();
    if !trimmed.starts_with('+') {
        return Err(InfrastructureError::Sms(
            "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
        ));
    }

    let parsed = trimmed
        .parse::<PhoneNumber>()
        .map_err(|e| InfrastructureError::Sms(format!("Invalid phone number format: {}", e)))?;

    if !phonenumber::is_valid(&parsed) {
        return Err(InfrastructureError::Sms(format!(
            "Invalid phone number: {}",
            mask_phone_number(trimmed)
        )));
    }

    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Pull a message identifier out of a gateway response, if there is one
pub(crate) fn extract_message_id(body: &serde_json::Value) -> Option<String> {
    ["messageId", "message_id", "id", "sid"]
        .iter()
        .find_map(|key| match body.get(*key) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        })
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let to = to_e164(phone_number)?;
        let masked = mask_phone_number(&to);
        debug!(provider = "http_sms", to = %masked, "Sending SMS");

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("X-RapidAPI-Key", &self.api_key)
            .json(&SmsRequestBody { to: &to, text: message });
        if let Some(host) = &self.api_host {
            request = request.header("X-RapidAPI-Host", host);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "http_sms",
                to = %masked,
                status = status.as_u16(),
                "SMS gateway rejected the message"
            );
            return Err(InfrastructureError::Sms(format!(
                "SMS gateway returned status {}: {}",
                status.as_u16(),
                body
            )));
        }

        let message_id = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| extract_message_id(&body))
            .unwrap_or_else(|| format!("sms_{}", uuid::Uuid::new_v4()));

        info!(
            provider = "http_sms",
            to = %masked,
            message_id = %message_id,
            "SMS sent"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "HTTP SMS"
    }
}
