use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::{claims::Claims, identity::VerifiedIdentity};
use crate::config::{JwtConfig, MAX_TTL_MINUTES};

/// The only algorithm tokens are signed or accepted with. Never read from a token.
const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("JWT secret is missing")]
    MissingSecret,
    #[error("token lifetime of {0} minutes is out of range")]
    InvalidTtl(i64),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Why the guard refused a token. Only ever logged, never sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("missing Authorization header")]
    MissingCarrier,
    #[error("Authorization header is not a bearer credential")]
    MalformedCarrier,
    #[error("signature mismatch")]
    BadSignature,
    #[error("unexpected signing algorithm")]
    AlgorithmMismatch,
    #[error("token expired")]
    Expired,
    #[error("missing claim: {0}")]
    MissingClaim(String),
    #[error("subject is not an account id")]
    MalformedSubject,
    #[error("malformed token")]
    Malformed,
}

/// Signing and verification keys for access tokens, derived once from config.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Result<Self, TokenError> {
        if cfg.secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }
        if !(1..=MAX_TTL_MINUTES).contains(&cfg.ttl_minutes) {
            return Err(TokenError::InvalidTtl(cfg.ttl_minutes));
        }
        let mut validation = Validation::new(ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            validation,
            ttl: Duration::minutes(cfg.ttl_minutes),
        })
    }

    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenError> {
        self.issue_at(account_id, OffsetDateTime::now_utc())
    }

    pub fn issue_at(
        &self,
        account_id: Uuid,
        issued_at: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: account_id.to_string(),
            iat: issued_at.unix_timestamp(),
            exp: issued_at
                .checked_add(self.ttl)
                .ok_or_else(|| TokenError::Signing("expiry out of range".into()))?
                .unix_timestamp(),
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;
        debug!(account_id = %account_id, exp = claims.exp, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenRejection> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.into_kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                ErrorKind::InvalidAlgorithm => TokenRejection::AlgorithmMismatch,
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                ErrorKind::MissingRequiredClaim(claim) => TokenRejection::MissingClaim(claim),
                _ => TokenRejection::Malformed,
            }
        })?;
        let account_id =
            Uuid::parse_str(&data.claims.sub).map_err(|_| TokenRejection::MalformedSubject)?;
        debug!(account_id = %account_id, "jwt verified");
        Ok(VerifiedIdentity::from_subject(account_id))
    }
}
