use anyhow::Context;
use serde::Deserialize;

/// Upper bound for `JWT_TTL_MINUTES`: thirty days.
pub const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Argon2 cost parameters used when hashing new passwords.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hashing: HashingConfig,
    pub host: String,
    pub port: u16,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let part = |key: &str| lookup(key).with_context(|| format!("{key} must be set"));
                format!(
                    "postgres://{}:{}@{}:{}/{}",
                    part("DB_USER")?,
                    part("DB_PASSWORD")?,
                    part("DB_HOST")?,
                    lookup("DB_PORT").unwrap_or_else(|| "5432".into()),
                    part("DB_NAME")?,
                )
            }
        };
        let database = DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2)?,
        };

        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set")?;
        let jwt = JwtConfig {
            secret,
            ttl_minutes: parse_or(&lookup, "JWT_TTL_MINUTES", 3 * 60)?,
        };
        anyhow::ensure!(
            (1..=MAX_TTL_MINUTES).contains(&jwt.ttl_minutes),
            "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}"
        );

        let defaults = HashingConfig::default();
        let hashing = HashingConfig {
            memory_kib: parse_or(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
            parallelism: parse_or(&lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
        };

        Ok(Self {
            database,
            jwt,
            hashing,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
