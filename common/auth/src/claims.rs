use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TokenError;
use crate::roles::Role;

/// Verified session claims reconstructed from a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub subject: String,
    pub role: Role,
    pub issuer: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub token_id: Option<Uuid>,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Wire payload. Shared by the signer so both sides agree on field names.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimsRepr {
    pub sub: String,
    pub role: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl From<&Claims> for ClaimsRepr {
    fn from(claims: &Claims) -> Self {
        Self {
            sub: claims.subject.clone(),
            role: claims.role.as_str().to_string(),
            iss: claims.issuer.clone(),
            iat: claims.issued_at.timestamp(),
            exp: claims.expires_at.timestamp(),
            jti: claims.token_id.map(|id| id.to_string()),
        }
    }
}

impl TryFrom<ClaimsRepr> for Claims {
    type Error = TokenError;

    fn try_from(value: ClaimsRepr) -> Result<Self, TokenError> {
        if value.sub.is_empty() {
            return Err(TokenError::Malformed("empty subject".into()));
        }

        // Unknown roles are rejected outright, never treated as a wildcard.
        let role = value
            .role
            .parse::<Role>()
            .map_err(|err| TokenError::Malformed(err.to_string()))?;

        let issued_at = timestamp("iat", value.iat)?;
        let expires_at = timestamp("exp", value.exp)?;

        let token_id = value
            .jti
            .map(|raw| {
                Uuid::parse_str(&raw)
                    .map_err(|_| TokenError::Malformed(format!("invalid jti '{raw}'")))
            })
            .transpose()?;

        Ok(Self {
            subject: value.sub,
            role,
            issuer: value.iss,
            issued_at,
            expires_at,
            token_id,
        })
    }
}

fn timestamp(name: &str, value: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(value, 0)
        .single()
        .ok_or_else(|| TokenError::Malformed(format!("invalid {name} '{value}'")))
}
