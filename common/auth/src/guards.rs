use axum::http::HeaderValue;
use tracing::{debug, warn};

use crate::error::{AuthError, AuthResult};
use crate::extractors::{parse_bearer, AuthContext};
use crate::roles::Role;
use crate::verifier::JwtVerifier;

/// Authorization gate: bearer extraction, token validation, role membership.
///
/// An empty `required` slice admits any authenticated identity. Otherwise the
/// claim role must be an exact member of `required`.
pub fn authorize(
    verifier: &JwtVerifier,
    header: Option<&HeaderValue>,
    required: &[Role],
) -> AuthResult<AuthContext> {
    let header = header.ok_or(AuthError::MissingAuthorization)?;
    let token = parse_bearer(header)?;

    let claims = verifier.validate(&token).map_err(|err| {
        debug!(reason = err.reason(), error = %err, "rejected bearer token");
        AuthError::InvalidToken(err)
    })?;

    let auth = AuthContext { claims, token };
    ensure_role(&auth, required)?;
    Ok(auth)
}

pub fn ensure_role(auth: &AuthContext, allowed: &[Role]) -> AuthResult<()> {
    if allowed.is_empty() || allowed.iter().any(|role| auth.claims.has_role(*role)) {
        return Ok(());
    }

    warn!(
        subject = %auth.claims.subject,
        role = %auth.claims.role,
        required = ?allowed,
        "role_check_failed"
    );
    Err(AuthError::Forbidden {
        required: allowed.to_vec(),
        actual: auth.claims.role,
    })
}
