use anyhow::{anyhow, ensure, Result};
use chrono::{DateTime, TimeZone, Utc};
use common_auth::{Claims, ClaimsRepr, JwtConfig, Role, TOKEN_ALGORITHM};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

/// Signs session tokens with the process-wide secret.
pub struct TokenSigner {
    config: JwtConfig,
    encoding_key: EncodingKey,
}

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    pub expires_in: i64,
    pub token_type: &'static str,
}

impl TokenSigner {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        Self {
            config,
            encoding_key,
        }
    }

    pub fn issue(&self, subject: &str, role: Role) -> Result<IssuedToken> {
        self.issue_at(subject, role, Utc::now())
    }

    pub fn issue_at(&self, subject: &str, role: Role, now: DateTime<Utc>) -> Result<IssuedToken> {
        ensure!(!subject.is_empty(), "token subject must not be empty");

        // Wire timestamps carry whole seconds.
        let issued_at = Utc
            .timestamp_opt(now.timestamp(), 0)
            .single()
            .ok_or_else(|| anyhow!("Invalid issue time {now}"))?;
        let ttl = self.config.ttl();
        let expires_at = issued_at + ttl;

        let claims = Claims {
            subject: subject.to_string(),
            role,
            issuer: self.config.issuer().to_string(),
            issued_at,
            expires_at,
            token_id: Some(Uuid::new_v4()),
        };

        let token = encode(
            &Header::new(TOKEN_ALGORITHM),
            &ClaimsRepr::from(&claims),
            &self.encoding_key,
        )
        .map_err(|err| anyhow!("Failed to sign access token: {err}"))?;

        Ok(IssuedToken {
            token,
            claims,
            expires_in: ttl.num_seconds(),
            token_type: "Bearer",
        })
    }
}
