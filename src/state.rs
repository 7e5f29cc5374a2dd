use std::sync::Arc;

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::{
    jwt::JwtKeys,
    password::PasswordHasher,
    repo::{AccountStore, PgAccountStore},
};
use crate::config::AppConfig;
use crate::db;
use crate::records::{
    categories::repo::{CategoryRepository, PgCategoryRepository},
    transactions::repo::{PgTransactionRepository, TransactionRepository},
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub hasher: PasswordHasher,
    pub accounts: Arc<dyn AccountStore>,
    pub categories: Arc<dyn CategoryRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let db = db::connect(&config.database).await?;
        Self::from_parts(db, config)
    }

    /// Wires the Postgres-backed stores. Fails on a bad signing secret or
    /// hashing parameters, so misconfiguration surfaces at startup.
    pub fn from_parts(db: PgPool, config: AppConfig) -> anyhow::Result<Self> {
        let keys = JwtKeys::new(&config.jwt).context("build JWT keys")?;
        let hasher = PasswordHasher::new(config.hashing).context("build password hasher")?;

        Ok(Self {
            accounts: Arc::new(PgAccountStore::new(db.clone())),
            categories: Arc::new(PgCategoryRepository::new(db.clone())),
            transactions: Arc::new(PgTransactionRepository::new(db.clone())),
            db,
            config: Arc::new(config),
            keys,
            hasher,
        })
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}
