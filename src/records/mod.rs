//! Tenant-scoped budget records. Every repository call takes the caller's
//! [`VerifiedIdentity`](crate::auth::VerifiedIdentity) and scopes reads and
//! writes to that account only.

use axum::{middleware::from_fn_with_state, Router};
use thiserror::Error;

use crate::{auth::guard::require_identity, state::AppState};

pub mod categories;
pub mod transactions;

#[derive(Debug, Clone, Error)]
pub enum RecordError {
    #[error("{0}")]
    Conflict(String),
    #[error("category does not belong to this account")]
    UnknownCategory,
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for RecordError {
    fn from(e: sqlx::Error) -> Self {
        RecordError::Unavailable(e.to_string())
    }
}

/// All record routes, behind the token guard.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(categories::handlers::category_routes())
        .merge(transactions::handlers::transaction_routes())
        .route_layer(from_fn_with_state(state, require_identity))
}
