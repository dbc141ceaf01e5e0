//! Conversion of domain errors into HTTP responses
//!
//! Every endpoint reports failures as `{"errors": [{"msg": "..."}]}`. The
//! status code is chosen here and nowhere else.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use validator::ValidationErrors;

use sf_core::errors::{AuthError, DomainError, TokenError, ValidationError, VerificationError};
use sf_shared::{ErrorMessage, ErrorResponse};

const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Error returned by route handlers
#[derive(Debug)]
pub enum ApiError {
    /// A failure raised by the core services
    Domain(DomainError),
    /// Request body rejected by DTO validation
    InvalidRequest(ValidationErrors),
    /// A failure inside the auth gate; always answered with 401
    Gate(DomainError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Domain(e) | ApiError::Gate(e) => write!(f, "{}", e),
            ApiError::InvalidRequest(e) => write!(f, "Invalid request: {}", e),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::InvalidRequest(errors)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(e) => domain_status(e),
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Gate(e) => gate_status(e),
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let body = match self {
            ApiError::InvalidRequest(errors) => ErrorResponse::many(validation_messages(errors)),
            ApiError::Domain(e) | ApiError::Gate(e) => {
                if status.is_server_error() {
                    log::error!("Request failed: {}", e);
                } else {
                    log::debug!("Request rejected with {}: {}", status.as_u16(), e);
                }
                ErrorResponse::single(public_message(e, status))
            }
        };

        let mut response = HttpResponse::build(status);
        if let ApiError::Domain(DomainError::Verification(VerificationError::RateLimited {
            retry_after_seconds,
            ..
        })) = self
        {
            response.insert_header(("Retry-After", retry_after_seconds.to_string()));
        }

        response.json(body)
    }
}

/// Status code for an error raised outside the auth gate
pub fn domain_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth) => match auth {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::MissingToken
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials
            | AuthError::AccountInactive => StatusCode::UNAUTHORIZED,
        },
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Verification(verification) => match verification {
            VerificationError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            VerificationError::DispatchFailed { .. } => StatusCode::BAD_GATEWAY,
            VerificationError::InvalidCode
            | VerificationError::AlreadyVerified { .. }
            | VerificationError::MissingPhone => StatusCode::BAD_REQUEST,
        },
        DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Internal { .. } | DomainError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Status code for an error raised while resolving the session
///
/// A missing user behind a valid token is reported like any other
/// authentication failure.
pub fn gate_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Internal { .. } | DomainError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::UNAUTHORIZED,
    }
}

fn public_message(error: &DomainError, status: StatusCode) -> String {
    if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
        return SERVER_ERROR_MESSAGE.to_string();
    }

    match error {
        DomainError::Auth(AuthError::UserNotFound) if status == StatusCode::UNAUTHORIZED => {
            AuthError::InvalidToken.to_string()
        }
        DomainError::Token(_) => AuthError::InvalidToken.to_string(),
        DomainError::Verification(VerificationError::DispatchFailed { channel, .. }) => {
            format!(
                "Failed to send {} verification. Please try again later",
                channel
            )
        }
        DomainError::NotFound { resource } => format!("{} not found", resource),
        DomainError::Auth(e) => e.to_string(),
        DomainError::Verification(e) => e.to_string(),
        DomainError::ValidationErr(e) => validation_error_message(e),
        DomainError::Internal { .. } | DomainError::Database(_) => {
            SERVER_ERROR_MESSAGE.to_string()
        }
    }
}

fn validation_error_message(error: &ValidationError) -> String {
    match error {
        ValidationError::InvalidFormat { field } if field == "verificationCode" => {
            "Verification code must be 6 digits".to_string()
        }
        ValidationError::InvalidFormat { field } if field == "token" => {
            "Invalid verification token".to_string()
        }
        other => other.to_string(),
    }
}

fn validation_messages(errors: &ValidationErrors) -> Vec<ErrorMessage> {
    let mut messages: Vec<ErrorMessage> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                ErrorMessage::for_param(field.to_string(), msg)
            })
        })
        .collect();

    // field_errors() is a HashMap; keep the payload stable
    messages.sort_by(|a, b| a.param.cmp(&b.param));
    messages
}
