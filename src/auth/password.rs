use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

use crate::config::HashingConfig;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    HashingFailure(String),
    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Argon2id hasher with cost parameters fixed at construction.
///
/// Verification always uses the parameters recorded in the stored PHC string,
/// so raising the cost does not invalidate existing hashes.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    // Verified against when the account does not exist, so that an unknown
    // email costs the same as a wrong password.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cfg: HashingConfig) -> Result<Self, PasswordError> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
            .map_err(|e| PasswordError::HashingFailure(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, "budget-tracker-dummy-password")?;
        Ok(Self { argon2, dummy_hash })
    }

    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, plain)
    }

    /// Returns `Ok(false)` on mismatch; errors only when `hash` is not a PHC string.
    pub fn verify(&self, plain: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            PasswordError::MalformedHash(e.to_string())
        })?;
        Ok(self
            .argon2
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }

    pub fn verify_dummy(&self, plain: &str) {
        let _ = self.verify(plain, &self.dummy_hash);
    }

    /// Runs [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(&self, plain: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| PasswordError::HashingFailure(e.to_string()))?
    }

    /// Runs [`verify`](Self::verify) on the blocking pool. With `hash == None`
    /// the dummy hash is checked instead and the result is always `false`.
    pub async fn verify_blocking(
        &self,
        plain: String,
        hash: Option<String>,
    ) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => hasher.verify(&plain, &hash),
            None => {
                hasher.verify_dummy(&plain);
                Ok(false)
            }
        })
        .await
        .map_err(|e| PasswordError::HashingFailure(e.to_string()))?
    }
}

fn hash_with(argon2: &Argon2<'_>, plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            PasswordError::HashingFailure(e.to_string())
        })?
        .to_string();
    Ok(hash)
}
