use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{Category, CategoryKind};
use crate::{auth::VerifiedIdentity, records::RecordError};

#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    /// Fails with `Conflict` when the tenant already has a category of that name.
    async fn create(
        &self,
        tenant: &VerifiedIdentity,
        name: &str,
        kind: CategoryKind,
    ) -> Result<Category, RecordError>;

    /// The tenant's categories ordered by name.
    async fn list(&self, tenant: &VerifiedIdentity) -> Result<Vec<Category>, RecordError>;
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    kind: String,
    created_at: OffsetDateTime,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RecordError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            kind: row.kind.parse().map_err(RecordError::Unavailable)?,
            created_at: row.created_at,
        })
    }
}

pub const DUPLICATE_CATEGORY: &str = "Category with this name already exists";

/// `(user_id, name)` is the only unique constraint on `categories`.
fn insert_error(e: sqlx::Error) -> RecordError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            RecordError::Conflict(DUPLICATE_CATEGORY.into())
        }
        _ => RecordError::Unavailable(e.to_string()),
    }
}

pub struct PgCategoryRepository {
    db: PgPool,
}

impl PgCategoryRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(
        &self,
        tenant: &VerifiedIdentity,
        name: &str,
        kind: CategoryKind,
    ) -> Result<Category, RecordError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (user_id, name, type)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, type AS kind, created_at
            "#,
        )
        .bind(tenant.account_id())
        .bind(name)
        .bind(kind.as_str())
        .fetch_one(&self.db)
        .await
        .map_err(insert_error)?;
        row.try_into()
    }

    async fn list(&self, tenant: &VerifiedIdentity) -> Result<Vec<Category>, RecordError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, user_id, name, type AS kind, created_at
            FROM categories
            WHERE user_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(tenant.account_id())
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(Category::try_from).collect()
    }
}
