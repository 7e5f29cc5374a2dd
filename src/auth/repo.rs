use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::auth::repo_types::Account;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("account not found")]
    NotFound,
    #[error("account store unavailable: {0}")]
    Unavailable(String),
}

/// Durable account storage. Implementations must enforce email uniqueness
/// atomically: of two concurrent creates for the same email exactly one wins.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError>;

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError>;
}

/// Maps a failed `INSERT INTO users`: only the email unique constraint means a duplicate.
fn insert_error(e: sqlx::Error) -> StoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Unavailable(e.to_string()),
    }
}

pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn create_account(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Account, StoreError> {
        sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| StoreError::Unavailable(e.to_string()))?
        .ok_or(StoreError::NotFound)
    }
}
