//! Email and SMS provider configuration

use serde::{Deserialize, Serialize};

/// Which notification backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationProvider {
    /// Log messages instead of sending them
    Mock,
    /// Brevo for email and an HTTP SMS gateway for text messages
    Http,
}

impl std::str::FromStr for NotificationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(NotificationProvider::Mock),
            "http" | "brevo" => Ok(NotificationProvider::Http),
            _ => Err(format!("Invalid notification provider: {}", s)),
        }
    }
}

/// Notification provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Selected provider
    pub provider: NotificationProvider,

    /// Brevo API key
    #[serde(default)]
    pub brevo_api_key: Option<String>,

    /// Sender address for transactional email
    #[serde(default)]
    pub sender_email: Option<String>,

    /// Sender display name
    #[serde(default)]
    pub sender_name: Option<String>,

    /// SMS gateway endpoint
    #[serde(default)]
    pub sms_api_url: Option<String>,

    /// SMS gateway API key
    #[serde(default)]
    pub sms_api_key: Option<String>,

    /// SMS gateway host header (RapidAPI style gateways)
    #[serde(default)]
    pub sms_api_host: Option<String>,

    /// Public base URL of the storefront, used to build verification links
    pub app_base_url: String,

    /// Timeout for provider requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            provider: NotificationProvider::Mock,
            brevo_api_key: None,
            sender_email: None,
            sender_name: Some(String::from("Storefront")),
            sms_api_url: None,
            sms_api_key: None,
            sms_api_host: None,
            app_base_url: String::from("http://localhost:3000"),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl NotificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            provider: std::env::var("NOTIFICATION_PROVIDER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.provider),
            brevo_api_key: non_empty("BREVO_API_KEY"),
            sender_email: non_empty("BREVO_SENDER_EMAIL"),
            sender_name: non_empty("BREVO_SENDER_NAME").or(defaults.sender_name),
            sms_api_url: non_empty("SMS_API_URL"),
            sms_api_key: non_empty("SMS_API_KEY"),
            sms_api_host: non_empty("SMS_API_HOST"),
            app_base_url: non_empty("APP_BASE_URL").unwrap_or(defaults.app_base_url),
            request_timeout_secs: defaults.request_timeout_secs,
        }
    }

    /// Whether the Brevo credentials are present
    pub fn email_is_configured(&self) -> bool {
        self.brevo_api_key.is_some() && self.sender_email.is_some()
    }

    /// Whether the SMS gateway credentials are present
    pub fn sms_is_configured(&self) -> bool {
        self.sms_api_url.is_some() && self.sms_api_key.is_some()
    }
}

fn default_request_timeout() -> u64 {
    15
}
