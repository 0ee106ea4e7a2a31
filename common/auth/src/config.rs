use std::fmt;

use chrono::Duration;
use thiserror::Error;

/// Shortest HMAC secret accepted at startup.
pub const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("signing secret must not be empty")]
    EmptySecret,
    #[error("signing secret must be at least {min} bytes (got {actual})")]
    WeakSecret { min: usize, actual: usize },
    #[error("token issuer must not be empty")]
    EmptyIssuer,
    #[error("token ttl must be at least one hour")]
    InvalidTtl,
}

/// Immutable signing/verification settings shared by the token signer and
/// the verifier. Built once at startup.
#[derive(Clone)]
pub struct JwtConfig {
    secret: String,
    issuer: String,
    ttl_hours: u32,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        ttl_hours: u32,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::WeakSecret {
                min: MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        let issuer = issuer.into();
        if issuer.trim().is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }
        if ttl_hours == 0 {
            return Err(ConfigError::InvalidTtl);
        }

        Ok(Self {
            secret,
            issuer,
            ttl_hours,
        })
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn ttl_hours(&self) -> u32 {
        self.ttl_hours
    }

    pub fn ttl(&self) -> Duration {
        Duration::hours(i64::from(self.ttl_hours))
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("ttl_hours", &self.ttl_hours)
            .finish()
    }
}
