use axum::Json;
use common_auth::{ensure_role, AuthContext, AuthResult, Role};
use serde::Serialize;

pub const EMPLOYEE_ROLES: &[Role] = &[Role::Employee];
pub const PARTNER_ROLES: &[Role] = &[Role::Client, Role::Sponsor];

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub message: String,
    pub subject: String,
    pub role: Role,
}

pub async fn employee_area(auth: AuthContext) -> AuthResult<Json<AreaResponse>> {
    ensure_role(&auth, EMPLOYEE_ROLES)?;
    Ok(Json(AreaResponse {
        message: format!("Welcome to the employee area, {}.", auth.subject()),
        subject: auth.claims.subject.clone(),
        role: auth.claims.role,
    }))
}

pub async fn partner_area(auth: AuthContext) -> AuthResult<Json<AreaResponse>> {
    ensure_role(&auth, PARTNER_ROLES)?;
    let message = match auth.claims.role {
        Role::Sponsor => format!("Welcome to the sponsor area, {}.", auth.subject()),
        _ => format!("Welcome to the client area, {}.", auth.subject()),
    };
    Ok(Json(AreaResponse {
        message,
        subject: auth.claims.subject.clone(),
        role: auth.claims.role,
    }))
}
