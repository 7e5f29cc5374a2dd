use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub category_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub amount: i64, // cents
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: i64,
    pub description: String,
    pub date: OffsetDateTime,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: i64, // cents
    #[serde(default)]
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct CreatedTransactionResponse {
    pub id: Uuid,
    pub status: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct TransactionList {
    pub data: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_income: i64,
    pub total_expense: i64,
    pub net_balance: i64,
}
