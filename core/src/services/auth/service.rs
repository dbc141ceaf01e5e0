//! Main authentication service implementation

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use sf_shared::email::{is_valid_email, mask_email, normalize_email};
use sf_shared::phone::{is_valid_international_phone, normalize_phone_number};

use crate::domain::entities::user::User;
use crate::domain::entities::verification::VerificationChannel;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::clock::{Clock, SystemClock};
use crate::services::token::{IssuedToken, TokenService};
use crate::services::verification::{NotificationDispatcher, VerificationService};

use super::config::AuthServiceConfig;

/// Registration request
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Secrets echoed back at registration when development codes are enabled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevCodes {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl DevCodes {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthOutcome {
    /// Signed session token
    pub token: IssuedToken,
    /// The authenticated user
    pub user: User,
    /// Development codes, empty outside dev mode and on login
    pub dev_codes: DevCodes,
}

/// Resolves a bearer token to an active user
///
/// Object-safe so the HTTP middleware can hold it without knowing the
/// repository and dispatcher types.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Resolve the user behind a session token
    ///
    /// # Returns
    ///
    /// * `Err(AuthError::MissingToken)` - No token was presented
    /// * `Err(AuthError::InvalidToken)` - Bad signature, expired or malformed
    /// * `Err(AuthError::UserNotFound)` - Token is valid but the user is gone
    /// * `Err(AuthError::AccountInactive)` - The user has been deactivated
    async fn authenticate(&self, token: Option<&str>) -> DomainResult<User>;
}

/// Authentication service for account creation, login and session checks
pub struct AuthService<U: UserRepository, N: NotificationDispatcher> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Verification service used to issue secrets at registration
    verification_service: Arc<VerificationService<U, N>>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U: UserRepository, N: NotificationDispatcher> AuthService<U, N> {
    /// Create a new authentication service using the system clock
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<U, N>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self::with_clock(
            user_repository,
            verification_service,
            token_service,
            Arc::new(SystemClock),
            config,
        )
    }

    /// Create a new authentication service with an explicit time source
    pub fn with_clock(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<U, N>>,
        token_service: Arc<TokenService>,
        clock: Arc<dyn Clock>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            clock,
            config,
        }
    }

    /// Register a new account
    ///
    /// This method:
    /// 1. Validates name, email, password and optional phone
    /// 2. Rejects an email that is already registered
    /// 3. Hashes the password and creates the user
    /// 4. Issues an email token, and a phone code when a phone was given
    /// 5. Signs a session token
    ///
    /// Dispatch failures during step 4 are logged and never fail registration.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<AuthOutcome> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }

        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if input.password.len() < self.config.min_password_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.min_password_length,
            }
            .into());
        }

        let phone = match input.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) if is_valid_international_phone(raw) => Some(normalize_phone_number(raw)),
            Some(_) => return Err(ValidationError::InvalidPhone.into()),
            None => None,
        };

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash =
            hash_password(input.password.clone(), self.config.bcrypt_cost).await?;

        let user = self
            .user_repository
            .create(User::new(name.to_string(), email, password_hash, phone))
            .await?;

        tracing::info!(
            user_id = %user.id,
            email = %mask_email(&user.email),
            event = "user_registered",
            "New user registered"
        );

        let mut dev_codes = DevCodes {
            email: self
                .issue_on_registration(user.clone(), VerificationChannel::Email)
                .await,
            phone: None,
        };

        if user.phone.is_some() {
            // Reload so the email secret persisted above is not overwritten
            let latest = self.load_user(user.id).await?;
            dev_codes.phone = self
                .issue_on_registration(latest, VerificationChannel::Phone)
                .await;
        }

        let user = self.load_user(user.id).await?;
        let token = self.token_service.issue(user.id, self.clock.now())?;

        Ok(AuthOutcome {
            token,
            user,
            dev_codes,
        })
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthOutcome> {
        let email = normalize_email(email);

        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_ok =
            verify_password(password.to_string(), user.password_hash.clone()).await;
        if !password_ok {
            tracing::warn!(
                user_id = %user.id,
                event = "login_failed",
                "Login attempt with wrong password"
            );
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            tracing::warn!(
                user_id = %user.id,
                event = "login_inactive",
                "Login attempt on deactivated account"
            );
            return Err(AuthError::AccountInactive.into());
        }

        let now = self.clock.now();
        user.update_last_login(now);
        let user = self.user_repository.update(user).await?;
        let token = self.token_service.issue(user.id, now)?;

        tracing::info!(user_id = %user.id, event = "login_succeeded", "User logged in");

        Ok(AuthOutcome {
            token,
            user,
            dev_codes: DevCodes::default(),
        })
    }

    /// Resolve a session token to an active user
    pub async fn resolve_session(&self, token: Option<&str>) -> DomainResult<User> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let user_id = self.token_service.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Session token rejected");
            AuthError::InvalidToken
        })?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            tracing::warn!(
                user_id = %user.id,
                event = "inactive_session",
                "Deactivated user presented a valid token"
            );
            return Err(AuthError::AccountInactive.into());
        }

        Ok(user)
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    async fn issue_on_registration(
        &self,
        user: User,
        channel: VerificationChannel,
    ) -> Option<String> {
        let user_id = user.id;
        match self.verification_service.issue_for_user(user, channel).await {
            Ok(result) => result.dev_code,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    channel = %channel,
                    error = %e,
                    event = "registration_verification_failed",
                    "Could not send verification during registration"
                );
                None
            }
        }
    }
}

#[async_trait]
impl<U, N> Authenticator for AuthService<U, N>
where
    U: UserRepository + 'static,
    N: NotificationDispatcher + 'static,
{
    async fn authenticate(&self, token: Option<&str>) -> DomainResult<User> {
        self.resolve_session(token).await
    }
}

/// bcrypt hash computed on the blocking pool
pub(super) async fn hash_password(password: String, cost: u32) -> DomainResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}

/// bcrypt check computed on the blocking pool
///
/// A malformed stored hash, or a panicked task, counts as a mismatch.
pub(super) async fn verify_password(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
