use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{Category, CategoryList, CreateCategoryRequest};
use crate::{auth::VerifiedIdentity, error::ApiError, state::AppState};

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(create_category))
}

#[instrument(skip(state, payload), fields(account_id = %identity.account_id()))]
pub async fn create_category(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
    payload: Result<Json<CreateCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let Json(payload) = payload?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Category name is required".into()));
    }

    let category = state
        .categories
        .create(&identity, name, payload.kind)
        .await?;
    info!(category_id = %category.id, kind = %category.kind, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state), fields(account_id = %identity.account_id()))]
pub async fn list_categories(
    State(state): State<AppState>,
    identity: VerifiedIdentity,
) -> Result<Json<CategoryList>, ApiError> {
    let data = state.categories.list(&identity).await?;
    Ok(Json(CategoryList { data }))
}
