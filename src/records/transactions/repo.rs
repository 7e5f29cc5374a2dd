use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::dto::{NewTransaction, Transaction};
use crate::{
    auth::VerifiedIdentity,
    records::{categories::dto::CategoryKind, RecordError},
};

#[async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Fails with `UnknownCategory` if `category_id` is not one of the tenant's categories.
    async fn create(
        &self,
        tenant: &VerifiedIdentity,
        new: NewTransaction,
    ) -> Result<Transaction, RecordError>;

    /// The tenant's transactions, most recent date first.
    async fn list(&self, tenant: &VerifiedIdentity) -> Result<Vec<Transaction>, RecordError>;

    /// Sum of amounts per category kind. Uncategorised transactions are not counted.
    async fn summary_by_kind(
        &self,
        tenant: &VerifiedIdentity,
    ) -> Result<HashMap<CategoryKind, i64>, RecordError>;
}

pub struct PgTransactionRepository {
    db: PgPool,
}

impl PgTransactionRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn create(
        &self,
        tenant: &VerifiedIdentity,
        new: NewTransaction,
    ) -> Result<Transaction, RecordError> {
        sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, amount, description, date, category_id)
            SELECT $1, $2, $3, $4, $5
            WHERE $5::uuid IS NULL
               OR EXISTS (SELECT 1 FROM categories WHERE id = $5 AND user_id = $1)
            RETURNING id, user_id, category_id, NULL::text AS category_name,
                      amount, description, date, created_at
            "#,
        )
        .bind(tenant.account_id())
        .bind(new.amount)
        .bind(&new.description)
        .bind(new.date)
        .bind(new.category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(RecordError::UnknownCategory)
    }

    async fn list(&self, tenant: &VerifiedIdentity) -> Result<Vec<Transaction>, RecordError> {
        let rows = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT t.id, t.user_id, t.category_id, c.name AS category_name,
                   t.amount, t.description, t.date, t.created_at
            FROM transactions t
            LEFT JOIN categories c ON c.id = t.category_id AND c.user_id = t.user_id
            WHERE t.user_id = $1
            ORDER BY t.date DESC, t.created_at DESC
            "#,
        )
        .bind(tenant.account_id())
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn summary_by_kind(
        &self,
        tenant: &VerifiedIdentity,
    ) -> Result<HashMap<CategoryKind, i64>, RecordError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT c.type, COALESCE(SUM(t.amount), 0)::BIGINT
            FROM transactions t
            JOIN categories c ON c.id = t.category_id AND c.user_id = t.user_id
            WHERE t.user_id = $1
            GROUP BY c.type
            "#,
        )
        .bind(tenant.account_id())
        .fetch_all(&self.db)
        .await?;
        totals_by_kind(rows)
    }
}

fn totals_by_kind(rows: Vec<(String, i64)>) -> Result<HashMap<CategoryKind, i64>, RecordError> {
    rows.into_iter()
        .map(|(kind, total)| {
            let kind = kind.parse().map_err(RecordError::Unavailable)?;
            Ok((kind, total))
        })
        .collect()
}
