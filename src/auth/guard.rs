use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::{
    identity::VerifiedIdentity,
    jwt::{JwtKeys, TokenRejection},
};
use crate::error::ApiError;

/// Middleware guarding every tenant-scoped route.
///
/// A request without a valid bearer token is answered with a generic 401 and
/// never reaches the handler. On success the [`VerifiedIdentity`] is stored in
/// the request extensions for the handler to extract.
pub async fn require_identity(
    State(keys): State<JwtKeys>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = bearer_token(req.headers())
        .and_then(|token| keys.verify(token))
        .map_err(|reason| {
            warn!(%reason, method = %req.method(), uri = %req.uri(), "token rejected");
            ApiError::TokenInvalid
        })?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

/// Pulls the token out of `Authorization: Bearer <token>`; the scheme is
/// matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenRejection> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(TokenRejection::MissingCarrier)?
        .to_str()
        .map_err(|_| TokenRejection::MalformedCarrier)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(TokenRejection::MalformedCarrier)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(TokenRejection::MalformedCarrier);
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .copied()
            .ok_or_else(|| {
                warn!(uri = %parts.uri, "handler reached without a verified identity");
                ApiError::TokenInvalid
            })
    }
}
