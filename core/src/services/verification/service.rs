//! Main verification service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use sf_shared::{email::mask_email, phone::mask_phone_number};

use crate::domain::entities::user::User;
use crate::domain::entities::verification::{
    generate_email_token, generate_phone_code, hash_email_token, is_valid_email_token_format,
    is_valid_phone_code_format, SecretCheck, VerificationChannel,
};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError, VerificationError};
use crate::repositories::UserRepository;
use crate::services::clock::{Clock, SystemClock};

use super::config::VerificationServiceConfig;
use super::traits::NotificationDispatcher;
use super::types::{IssueResult, VerificationStatus};

/// Verification service for email tokens and phone codes
pub struct VerificationService<U: UserRepository, N: NotificationDispatcher> {
    /// User repository holding the pending secrets
    user_repository: Arc<U>,
    /// Outbound email and SMS delivery
    dispatcher: Arc<N>,
    /// Time source for expiry and cooldown checks
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<U: UserRepository, N: NotificationDispatcher> VerificationService<U, N> {
    /// Create a new verification service using the system clock
    pub fn new(
        user_repository: Arc<U>,
        dispatcher: Arc<N>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self::with_clock(user_repository, dispatcher, Arc::new(SystemClock), config)
    }

    /// Create a new verification service with an explicit time source
    pub fn with_clock(
        user_repository: Arc<U>,
        dispatcher: Arc<N>,
        clock: Arc<dyn Clock>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            dispatcher,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Issue and send an email verification token
    pub async fn send_email_verification(&self, user_id: Uuid) -> DomainResult<IssueResult> {
        self.issue(user_id, VerificationChannel::Email).await
    }

    /// Issue and send a phone verification code
    pub async fn send_phone_verification(&self, user_id: Uuid) -> DomainResult<IssueResult> {
        self.issue(user_id, VerificationChannel::Phone).await
    }

    /// Issue a verification secret for the user identified by `user_id`
    pub async fn issue(
        &self,
        user_id: Uuid,
        channel: VerificationChannel,
    ) -> DomainResult<IssueResult> {
        let user = self.load_user(user_id).await?;
        self.issue_for_user(user, channel).await
    }

    /// Issue a verification secret for an already loaded user
    ///
    /// This method:
    /// 1. Rejects verified channels and users without a phone
    /// 2. Enforces the per-channel resend cooldown
    /// 3. Generates and persists a new secret, replacing any pending one
    /// 4. Dispatches the secret and records the send time
    ///
    /// A request rejected by the cooldown leaves the stored secret untouched.
    pub async fn issue_for_user(
        &self,
        mut user: User,
        channel: VerificationChannel,
    ) -> DomainResult<IssueResult> {
        let now = self.clock.now();

        if user.is_verified(channel) {
            return Err(VerificationError::AlreadyVerified { channel }.into());
        }

        let destination = match channel {
            VerificationChannel::Email => user.email.clone(),
            VerificationChannel::Phone => {
                user.phone.clone().ok_or(VerificationError::MissingPhone)?
            }
        };
        let masked = mask_destination(channel, &destination);

        let cooldown_seconds = self.config.cooldown_seconds(channel);
        let remaining = user.cooldown_remaining(channel, cooldown_seconds, now);
        if remaining > 0 {
            tracing::warn!(
                user_id = %user.id,
                channel = %channel,
                retry_after_seconds = remaining,
                event = "verification_rate_limited",
                "Verification resend requested inside cooldown window"
            );
            return Err(VerificationError::RateLimited {
                channel,
                retry_after_seconds: remaining,
            }
            .into());
        }

        let secret = match channel {
            VerificationChannel::Email => generate_email_token(),
            VerificationChannel::Phone => generate_phone_code(),
        };
        let stored = match channel {
            VerificationChannel::Email => hash_email_token(&secret),
            VerificationChannel::Phone => secret.clone(),
        };
        let expires_at = offset(
            now,
            Duration::try_minutes(self.config.expiration_minutes(channel)),
            "verification expiry",
        )?;
        let next_resend_at = offset(
            now,
            Duration::try_seconds(cooldown_seconds),
            "verification cooldown",
        )?;

        user.set_pending_secret(channel, stored, expires_at, now);
        let user = self.user_repository.update(user).await?;

        tracing::info!(
            user_id = %user.id,
            channel = %channel,
            destination = %masked,
            event = "verification_issued",
            "Generated new verification secret"
        );

        let dispatched = match channel {
            VerificationChannel::Email => {
                self.dispatcher
                    .send_email_verification(&destination, &user.name, &secret)
                    .await
            }
            VerificationChannel::Phone => {
                self.dispatcher.send_phone_code(&destination, &secret).await
            }
        };

        let message_id = match dispatched {
            Ok(message_id) => {
                tracing::info!(
                    user_id = %user.id,
                    channel = %channel,
                    message_id = %message_id,
                    event = "verification_dispatched",
                    "Verification secret sent"
                );
                Some(message_id)
            }
            Err(reason) if self.config.dev_mode => {
                tracing::warn!(
                    user_id = %user.id,
                    channel = %channel,
                    error = %reason,
                    event = "verification_dispatch_failed",
                    "Dispatch failed, continuing with development code"
                );
                None
            }
            Err(reason) => {
                tracing::error!(
                    user_id = %user.id,
                    channel = %channel,
                    destination = %masked,
                    error = %reason,
                    event = "verification_dispatch_failed",
                    "Failed to send verification secret"
                );
                return Err(VerificationError::DispatchFailed { channel, reason }.into());
            }
        };

        // The row may have changed while the provider call was in flight
        let mut user = self.load_user(user.id).await?;
        user.mark_sent(channel, now);
        self.user_repository.update(user).await?;

        Ok(IssueResult {
            channel,
            expires_at,
            next_resend_at,
            message_id,
            dev_code: self.config.dev_mode.then_some(secret),
        })
    }

    /// Check a submitted phone code for the user
    pub async fn verify_phone_code(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        let code = code.trim();
        if !is_valid_phone_code_format(code) {
            return Err(ValidationError::InvalidFormat {
                field: "verificationCode".to_string(),
            }
            .into());
        }

        let user = self.load_user(user_id).await?;
        self.apply_check(user, VerificationChannel::Phone, code).await
    }

    /// Check a submitted email token for the signed-in user
    pub async fn verify_email_token(&self, user_id: Uuid, token: &str) -> DomainResult<()> {
        let digest = email_token_digest(token)?;
        let user = self.load_user(user_id).await?;
        self.apply_check(user, VerificationChannel::Email, &digest)
            .await
    }

    /// Check an email token from a verification link, without a session
    ///
    /// Returns the id of the user whose email was verified.
    pub async fn verify_email_link(&self, token: &str) -> DomainResult<Uuid> {
        let digest = email_token_digest(token)?;
        let user = self
            .user_repository
            .find_by_email_token_hash(&digest)
            .await?
            .ok_or(VerificationError::InvalidCode)?;
        let user_id = user.id;

        self.apply_check(user, VerificationChannel::Email, &digest)
            .await?;
        Ok(user_id)
    }

    /// Report verification flags and resend availability
    pub async fn status(&self, user_id: Uuid) -> DomainResult<VerificationStatus> {
        let user = self.load_user(user_id).await?;
        let now = self.clock.now();

        let email_wait = user.cooldown_remaining(
            VerificationChannel::Email,
            self.config.email_resend_cooldown_seconds,
            now,
        );
        let phone_wait = user.cooldown_remaining(
            VerificationChannel::Phone,
            self.config.sms_resend_cooldown_seconds,
            now,
        );

        Ok(VerificationStatus {
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            can_resend_email: !user.email_verified && email_wait == 0,
            can_resend_phone: user.phone.is_some() && !user.phone_verified && phone_wait == 0,
            email_resend_available_in: email_wait,
            phone_resend_available_in: phone_wait,
        })
    }

    async fn load_user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Compare, consume and persist; wrong and expired secrets share one error
    async fn apply_check(
        &self,
        mut user: User,
        channel: VerificationChannel,
        provided: &str,
    ) -> DomainResult<()> {
        let now = self.clock.now();

        match user.consume_secret(channel, provided, now) {
            SecretCheck::Matched => {
                let user = self.user_repository.update(user).await?;
                tracing::info!(
                    user_id = %user.id,
                    channel = %channel,
                    event = "verification_succeeded",
                    "Contact channel verified"
                );
                Ok(())
            }
            SecretCheck::Expired => {
                self.user_repository.update(user.clone()).await?;
                tracing::warn!(
                    user_id = %user.id,
                    channel = %channel,
                    event = "verification_expired",
                    "Expired verification secret submitted and cleared"
                );
                Err(VerificationError::InvalidCode.into())
            }
            SecretCheck::Mismatch | SecretCheck::Missing => {
                tracing::warn!(
                    user_id = %user.id,
                    channel = %channel,
                    event = "verification_failed",
                    "Invalid verification secret submitted"
                );
                Err(VerificationError::InvalidCode.into())
            }
        }
    }
}

fn mask_destination(channel: VerificationChannel, destination: &str) -> String {
    match channel {
        VerificationChannel::Email => mask_email(destination),
        VerificationChannel::Phone => mask_phone_number(destination),
    }
}

/// `now + delta`, failing instead of panicking when a configured value is out of range
fn offset(
    now: DateTime<Utc>,
    delta: Option<Duration>,
    setting: &str,
) -> DomainResult<DateTime<Utc>> {
    delta
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| {
            tracing::error!(setting, "Configured duration out of range");
            DomainError::Internal {
                message: format!("{} out of range", setting),
            }
        })
}

/// Digest of a submitted email token
///
/// Tokens are issued as lowercase hex; a retyped uppercase token digests to
/// the same value.
fn email_token_digest(token: &str) -> DomainResult<String> {
    let token = token.trim().to_ascii_lowercase();
    if !is_valid_email_token_format(&token) {
        return Err(ValidationError::InvalidFormat {
            field: "token".to_string(),
        }
        .into());
    }
    Ok(hash_email_token(&token))
}
