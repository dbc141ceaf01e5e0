//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and every operation returns a `DomainError` on
//! storage failure. Lookups return `Ok(None)` when nothing matches.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find the user holding a pending email token with the given digest
    ///
    /// Used by link-based verification where the caller is not signed in.
    async fn find_by_email_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Returns
    /// * `Err(AuthError::UserAlreadyExists)` - The email address is already taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist all fields of an existing user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with this id exists
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check whether an email address is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
