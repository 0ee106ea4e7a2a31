use axum::response::{IntoResponse, Response};
use common_http_errors::ApiError;
use thiserror::Error;

use crate::roles::Role;

pub type AuthResult<T> = Result<T, AuthError>;

/// Why a token failed validation. Only used for internal diagnostics; every
/// variant leaves the service as the same generic 401.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token signature invalid")]
    BadSignature,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("issuer mismatch: expected '{expected}', found '{found}'")]
    IssuerMismatch { expected: String, found: String },
}

impl TokenError {
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Expired => "expired",
            TokenError::BadSignature => "bad_signature",
            TokenError::Malformed(_) => "malformed",
            TokenError::IssuerMismatch { .. } => "issuer_mismatch",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match value.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(value.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("authorization header missing")]
    MissingAuthorization,
    #[error("authorization header malformed")]
    InvalidAuthorization,
    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),
    #[error("role '{actual}' is not one of the required roles {required:?}")]
    Forbidden { required: Vec<Role>, actual: Role },
}

impl AuthError {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthError::Forbidden { .. })
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Forbidden { .. } => ApiError::Forbidden,
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorization
            | AuthError::InvalidToken(_) => ApiError::unauthorized(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn every_token_failure_collapses_to_unauthorized() {
        let failures = [
            TokenError::Expired,
            TokenError::BadSignature,
            TokenError::Malformed("garbage".into()),
            TokenError::IssuerMismatch {
                expected: "a".into(),
                found: "b".into(),
            },
        ];
        for failure in failures {
            let response = AuthError::from(failure).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert_eq!(response.headers().get("X-Error-Code").unwrap(), "unauthorized");
        }

        let response = AuthError::MissingAuthorization.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let err = AuthError::Forbidden {
            required: vec![Role::Employee],
            actual: Role::Client,
        };
        assert!(err.is_forbidden());
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }
}
