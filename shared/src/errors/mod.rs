//! Error payload shared by every endpoint
//!
//! Errors are reported as a list of messages so that validation failures on
//! several fields can be returned at once:
//!
//! ```json
//! { "errors": [ { "msg": "Invalid verification code" } ] }
//! ```

use serde::{Deserialize, Serialize};

/// A single error message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// Human-readable message
    pub msg: String,

    /// Request field the message refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl ErrorMessage {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }

    pub fn for_param(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }
}

/// Standard error response structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorMessage>,
}

impl ErrorResponse {
    /// Create a response carrying one message
    pub fn single(msg: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorMessage::new(msg)],
        }
    }

    /// Create a response from several messages
    pub fn many(errors: Vec<ErrorMessage>) -> Self {
        Self { errors }
    }

    /// First message, used by logs and tests
    pub fn first_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.msg.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_error_serialization() {
        let response = ErrorResponse::single("Not authorized");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "errors": [ { "msg": "Not authorized" } ] }));
    }

    #[test]
    fn test_param_is_serialized_when_present() {
        let response = ErrorResponse::many(vec![
            ErrorMessage::for_param("email", "Please include a valid email"),
            ErrorMessage::new("Password is required"),
        ]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["errors"][0]["param"], "email");
        assert!(json["errors"][1].get("param").is_none());
        assert_eq!(response.first_message(), Some("Please include a valid email"));
    }
}
