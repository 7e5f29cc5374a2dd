use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CredentialsRequest, PublicAccount, TokenResponse},
        repo::StoreError,
    },
    error::ApiError,
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Emails are compared case-insensitively: stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PublicAccount>), ApiError> {
    let Json(payload) = payload?;
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let hash = state.hasher.hash_blocking(payload.password).await?;

    let account = match state.accounts.create_account(&email, &hash).await {
        Ok(account) => account,
        Err(StoreError::DuplicateEmail) => {
            warn!(email = %email, "email already registered");
            return Err(ApiError::DuplicateEmail);
        }
        Err(e) => return Err(e.into()),
    };

    info!(account_id = %account.id, email = %account.email, "account registered");
    Ok((StatusCode::CREATED, Json(account.into())))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;
    let email = normalize_email(&payload.email);

    let account = match state.accounts.find_account_by_email(&email).await {
        Ok(account) => Some(account),
        Err(StoreError::NotFound) => None,
        Err(e) => return Err(e.into()),
    };

    // Unknown emails still pay for a hash verification.
    let matched = state
        .hasher
        .verify_blocking(
            payload.password,
            account.as_ref().map(|a| a.password_hash.clone()),
        )
        .await?;

    let account = match account {
        Some(account) if matched => account,
        Some(account) => {
            warn!(account_id = %account.id, "login invalid password");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = state.keys.issue(account.id)?;
    info!(account_id = %account.id, "account logged in");
    Ok(Json(TokenResponse { token }))
}
