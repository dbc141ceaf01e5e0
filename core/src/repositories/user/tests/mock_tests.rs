//! Unit tests for the in-memory user repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification::VerificationChannel;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user_with_email(email: &str) -> User {
    User::new(
        "Test User".to_string(),
        email.to_string(),
        "hash".to_string(),
        None,
    )
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let user = user_with_email("a@example.com");

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(found.unwrap().email, "a@example.com");

    let found = repo.find_by_email("a@example.com").await.unwrap();
    assert!(found.is_some());
    assert!(repo.exists_by_email("a@example.com").await.unwrap());
    assert!(!repo.exists_by_email("b@example.com").await.unwrap());
}

#[tokio::test]
async fn test_mock_repository_duplicate_email() {
    let repo = MockUserRepository::new();
    repo.create(user_with_email("dup@example.com")).await.unwrap();

    let result = repo.create(user_with_email("dup@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_mock_repository_update_missing_user() {
    let repo = MockUserRepository::new();
    let result = repo.update(user_with_email("ghost@example.com")).await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_mock_repository_find_by_email_token_hash() {
    let repo = MockUserRepository::new();
    let mut user = repo.create(user_with_email("c@example.com")).await.unwrap();

    let now = Utc::now();
    user.set_pending_secret(
        VerificationChannel::Email,
        "digest-abc".to_string(),
        now + Duration::hours(24),
        now,
    );
    repo.update(user.clone()).await.unwrap();

    let found = repo.find_by_email_token_hash("digest-abc").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));
    assert!(repo.find_by_email_token_hash("other").await.unwrap().is_none());
}
