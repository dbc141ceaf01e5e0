//! MySQL implementation of the UserRepository trait.
//!
//! All user fields, including the pending verification secrets and resend
//! timestamps, live in a single `users` row. `update` writes the full row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use sf_core::domain::entities::user::{User, UserRole};
use sf_core::errors::{AuthError, DomainError};
use sf_core::repositories::UserRepository;

const USER_COLUMNS: &str = r#"
    id, name, email, phone, password_hash, role,
    email_verified, phone_verified,
    email_verification_token, email_verification_expires,
    phone_verification_code, phone_verification_expires,
    last_verification_email_sent, last_verification_sms_sent,
    is_active, created_at, updated_at, last_login_at
"#;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        fn column<'r, T>(row: &'r sqlx::mysql::MySqlRow, name: &str) -> Result<T, DomainError>
        where
            T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
        {
            row.try_get(name)
                .map_err(|e| DomainError::Database(format!("Failed to get {}: {}", name, e)))
        }

        let id: String = column(row, "id")?;
        let role: String = column(row, "role")?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {}", e)))?,
            name: column(row, "name")?,
            email: column(row, "email")?,
            phone: column(row, "phone")?,
            password_hash: column(row, "password_hash")?,
            // Unknown roles degrade to the least privileged one
            role: role.parse().unwrap_or(UserRole::Customer),
            email_verified: column(row, "email_verified")?,
            phone_verified: column(row, "phone_verified")?,
            email_verification_token: column(row, "email_verification_token")?,
            email_verification_expires: column::<Option<DateTime<Utc>>>(
                row,
                "email_verification_expires",
            )?,
            phone_verification_code: column(row, "phone_verification_code")?,
            phone_verification_expires: column::<Option<DateTime<Utc>>>(
                row,
                "phone_verification_expires",
            )?,
            last_verification_email_sent: column::<Option<DateTime<Utc>>>(
                row,
                "last_verification_email_sent",
            )?,
            last_verification_sms_sent: column::<Option<DateTime<Utc>>>(
                row,
                "last_verification_sms_sent",
            )?,
            is_active: column(row, "is_active")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
            last_login_at: column::<Option<DateTime<Utc>>>(row, "last_login_at")?,
        })
    }

    async fn find_one(&self, filter: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, filter);

        let result = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {}", e)))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one("email", email.to_string()).await
    }

    async fn find_by_email_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, DomainError> {
        self.find_one("email_verification_token", token_hash.to_string())
            .await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        // Check for duplicate email first
        if self.exists_by_email(&user.email).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let query = r#"
            INSERT INTO users (
                id, name, email, phone, password_hash, role,
                email_verified, phone_verified,
                email_verification_token, email_verification_expires,
                phone_verification_code, phone_verification_expires,
                last_verification_email_sent, last_verification_sms_sent,
                is_active, created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.email_verified)
            .bind(user.phone_verified)
            .bind(&user.email_verification_token)
            .bind(user.email_verification_expires)
            .bind(&user.phone_verification_code)
            .bind(user.phone_verification_expires)
            .bind(user.last_verification_email_sent)
            .bind(user.last_verification_sms_sent)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(insert_error)?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                name = ?,
                email = ?,
                phone = ?,
                password_hash = ?,
                role = ?,
                email_verified = ?,
                phone_verified = ?,
                email_verification_token = ?,
                email_verification_expires = ?,
                phone_verification_code = ?,
                phone_verification_expires = ?,
                last_verification_email_sent = ?,
                last_verification_sms_sent = ?,
                is_active = ?,
                updated_at = ?,
                last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.email_verified)
            .bind(user.phone_verified)
            .bind(&user.email_verification_token)
            .bind(user.email_verification_expires)
            .bind(&user.phone_verification_code)
            .bind(user.phone_verification_expires)
            .bind(user.last_verification_email_sent)
            .bind(user.last_verification_sms_sent)
            .bind(user.is_active)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update user: {}", e)))?;

        // MySQL reports 0 affected rows when nothing changed, so confirm existence
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE email = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to check user existence: {}", e)))?;

        let exists: i64 = result
            .try_get("user_exists")
            .map_err(|e| DomainError::Database(format!("Failed to get existence result: {}", e)))?;

        Ok(exists == 1)
    }
}

/// A unique-key violation means another registration took the email first
fn insert_error(error: sqlx::Error) -> DomainError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AuthError::UserAlreadyExists.into()
        }
        _ => DomainError::Database(format!("Failed to create user: {}", error)),
    }
}
