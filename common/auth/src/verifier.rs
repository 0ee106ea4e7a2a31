use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use crate::claims::{Claims, ClaimsRepr};
use crate::config::JwtConfig;
use crate::error::TokenError;

/// Algorithm used for every token issued and accepted by the service.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Validates bearer tokens against the process-wide secret and issuer.
///
/// Validation is a pure function of the token, the secret and the clock: no
/// revocation list is consulted, so a token stays valid until its `exp`
/// passes even after the holder logged out.
#[derive(Clone)]
pub struct JwtVerifier {
    config: JwtConfig,
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let key = DecodingKey::from_secret(config.secret());

        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // exp and iss are checked by hand so that `exp == now` is already
        // expired and each failure keeps its own reason.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            config,
            key,
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<ClaimsRepr>(token, &self.key, &self.validation)?;
        let claims = Claims::try_from(token_data.claims)?;

        if claims.expires_at <= now {
            return Err(TokenError::Expired);
        }

        if claims.issuer != self.config.issuer() {
            return Err(TokenError::IssuerMismatch {
                expected: self.config.issuer().to_string(),
                found: claims.issuer,
            });
        }

        debug!(subject = %claims.subject, role = %claims.role, "verified JWT successfully");
        Ok(claims)
    }
}
