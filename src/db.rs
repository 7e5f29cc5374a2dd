use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let db = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .max_lifetime(Duration::from_secs(60 * 60))
        .acquire_timeout(Duration::from_secs(5))
        .connect(&cfg.url)
        .await
        .context("connect to database")?;
    Ok(db)
}

pub async fn ping(db: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1")
        .execute(db)
        .await
        .context("ping database")?;
    Ok(())
}
