use crate::state::AppState;
use axum::Router;

pub mod claims;
pub mod dto;
pub mod guard;
pub mod handlers;
pub mod identity;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use identity::VerifiedIdentity;

/// Public routes: registration and login.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
