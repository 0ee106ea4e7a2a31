use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::SecondsFormat;
use common_auth::AuthContext;
use common_http_errors::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::service::LoginError;
use crate::AppState;

pub const INVALID_BODY: &str = "invalid_body";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl From<LoginError> for ApiError {
    fn from(value: LoginError) -> Self {
        match value {
            LoginError::BadRequest { code, message } => ApiError::bad_request(code, message),
            LoginError::InvalidCredentials => ApiError::invalid_credentials(),
            LoginError::Internal(message) => {
                let trace_id = Uuid::new_v4();
                error!(%trace_id, error = %message, "Login failed with internal error");
                ApiError::Internal { trace_id }
            }
        }
    }
}

pub async fn login_user(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    // Parser detail stays in the logs; callers get the fixed envelope.
    let Json(LoginRequest { username, password }) = body.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "rejected login body");
        state.record_login_metric("bad_request");
        ApiError::bad_request(
            INVALID_BODY,
            "Request body must be a JSON object with username and password.",
        )
    })?;

    match state.authenticator.authenticate(&username, &password).await {
        Ok(issued) => {
            state.record_login_metric("success");
            Ok(Json(LoginResponse {
                token: issued.token,
                token_type: issued.token_type,
                expires_in: issued.expires_in,
                expires_at: issued
                    .claims
                    .expires_at
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            }))
        }
        Err(err) => {
            state.record_login_metric(err.outcome());
            Err(err.into())
        }
    }
}

/// Acknowledges the call and nothing else. The token stays valid until its
/// expiry because no revocation list exists.
pub async fn logout_user(State(state): State<AppState>, auth: AuthContext) -> Json<LogoutResponse> {
    info!(subject = %auth.subject(), role = %auth.claims.role, "logout acknowledged");
    state.record_logout_metric();
    Json(LogoutResponse {
        status: "logged_out",
        message: "Logged out. Discard the token; it remains valid until it expires.",
    })
}
