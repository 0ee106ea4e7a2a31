use axum::{http::{StatusCode, HeaderValue}, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use uuid::Uuid;

/// Messages are fixed per status so callers cannot learn which check failed.
const UNAUTHORIZED_MESSAGE: &str = "Authentication required.";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials. Please try again.";
const FORBIDDEN_MESSAGE: &str = "Insufficient role for this operation.";
const INTERNAL_MESSAGE: &str = "Internal server error.";

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] pub trace_id: Option<Uuid>,
}

#[derive(Debug)]
pub enum ApiError {
    Unauthorized { code: &'static str },
    Forbidden,
    BadRequest { code: &'static str, message: Option<String> },
    Internal { trace_id: Uuid },
}

impl ApiError {
    pub const INVALID_CREDENTIALS: &'static str = "invalid_credentials";
    pub const UNAUTHORIZED: &'static str = "unauthorized";

    pub fn unauthorized() -> Self { Self::Unauthorized { code: Self::UNAUTHORIZED } }
    pub fn invalid_credentials() -> Self { Self::Unauthorized { code: Self::INVALID_CREDENTIALS } }
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self { Self::BadRequest { code, message: Some(message.into()) } }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { code } => *code,
            ApiError::Forbidden => "forbidden",
            ApiError::BadRequest { code, .. } => *code,
            ApiError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_code = self.code();
        let body = match self {
            ApiError::Unauthorized { code } => ErrorBody {
                code: code.into(),
                message: if code == Self::INVALID_CREDENTIALS { INVALID_CREDENTIALS_MESSAGE } else { UNAUTHORIZED_MESSAGE }.into(),
                trace_id: None,
            },
            ApiError::Forbidden => ErrorBody { code: error_code.into(), message: FORBIDDEN_MESSAGE.into(), trace_id: None },
            ApiError::BadRequest { code, message } => ErrorBody {
                code: code.into(),
                message: message.unwrap_or_else(|| "Bad request.".into()),
                trace_id: None,
            },
            ApiError::Internal { trace_id } => ErrorBody { code: error_code.into(), message: INTERNAL_MESSAGE.into(), trace_id: Some(trace_id) },
        };
        let mut resp = (status, Json(body)).into_response();
        if let Ok(val) = HeaderValue::from_str(error_code) {
            resp.headers_mut().insert("X-Error-Code", val);
        }
        resp
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
