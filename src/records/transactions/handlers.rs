use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{
        CreateTransactionRequest, CreatedTransactionResponse, DashboardSummary, NewTransaction,
        TransactionList,
    },
    services,
};
use crate::{auth::VerifiedIdentity, error::ApiError, state::AppState};

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route("/dashboard", get(dashboard))
}

#[instrument(skip(state, payload), fields(account_id = %identity.account_id()))]
pub async fn create_transaction(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedTransactionResponse>), ApiError> {
    let Json(payload) = payload?;
    if payload.amount <= 0 {
        return Err(ApiError::Validation("Amount must be positive".into()));
    }

    let new = NewTransaction {
        amount: payload.amount,
        description: payload.description.trim().to_string(),
        date: payload.date,
        category_id: payload.category_id,
    };
    let tx = state.transactions.create(&identity, new).await?;
    info!(transaction_id = %tx.id, amount = tx.amount, "transaction created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedTransactionResponse {
            id: tx.id,
            status: "created",
            created_at: tx.created_at,
        }),
    ))
}

#[instrument(skip(state), fields(account_id = %identity.account_id()))]
pub async fn list_transactions(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
) -> Result<Json<TransactionList>, ApiError> {
    let data = state.transactions.list(&identity).await?;
    Ok(Json(TransactionList { data }))
}

#[instrument(skip(state), fields(account_id = %identity.account_id()))]
pub async fn dashboard(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
) -> Result<Json<DashboardSummary>, ApiError> {
    let summary = services::dashboard_summary(state.transactions.as_ref(), &identity).await?;
    Ok(Json(summary))
}
