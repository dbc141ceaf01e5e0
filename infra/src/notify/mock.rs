//! Mock notification provider
//!
//! Logs messages instead of sending them and keeps a copy of each one so
//! tests and local development can read the secrets back.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use sf_shared::email::mask_email;
use sf_shared::phone::{is_valid_international_phone, mask_phone_number};

use super::{EmailMessage, EmailSender, SmsSender};
use crate::InfrastructureError;

/// A message captured by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMessage {
    Email {
        message_id: String,
        message: EmailMessage,
    },
    Sms {
        message_id: String,
        to: String,
        body: String,
    },
}

/// Mock email and SMS provider for development and testing
///
/// Clones share the same outbox and failure switch.
#[derive(Clone, Default)]
pub struct MockNotifier {
    outbox: Arc<Mutex<Vec<SentMessage>>>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// All messages sent so far, oldest first
    pub fn sent(&self) -> Vec<SentMessage> {
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of messages sent so far
    pub fn message_count(&self) -> usize {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// The most recent SMS body sent to a phone number
    pub fn last_sms_to(&self, phone: &str) -> Option<String> {
        self.sent().into_iter().rev().find_map(|m| match m {
            SentMessage::Sms { to, body, .. } if to == phone => Some(body),
            _ => None,
        })
    }

    /// The most recent email sent to an address
    pub fn last_email_to(&self, email: &str) -> Option<EmailMessage> {
        self.sent().into_iter().rev().find_map(|m| match m {
            SentMessage::Email { message, .. } if message.to_email == email => Some(message),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, message: SentMessage) {
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message);
    }

    fn failing(&self) -> bool {
        self.simulate_failure.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailSender for MockNotifier {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let masked = mask_email(&message.to_email);

        if self.failing() {
            warn!(provider = "mock", to = %masked, "Simulating email failure");
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());

        // Full body is logged so the link can be copied during development
        info!(
            target: "notify",
            provider = "mock",
            to = %masked,
            message_id = %message_id,
            subject = %message.subject,
            body = %message.text,
            "Email sent (mock)"
        );

        self.record(SentMessage::Email {
            message_id: message_id.clone(),
            message: message.clone(),
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

#[async_trait]
impl SmsSender for MockNotifier {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(phone_number);

        if !is_valid_international_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked
            )));
        }

        if self.failing() {
            warn!(provider = "mock", to = %masked, "Simulating SMS failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());

        info!(
            target: "notify",
            provider = "mock",
            to = %masked,
            message_id = %message_id,
            body = %message,
            "SMS sent (mock)"
        );

        self.record(SentMessage::Sms {
            message_id: message_id.clone(),
            to: phone_number.to_string(),
            body: message.to_string(),
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
