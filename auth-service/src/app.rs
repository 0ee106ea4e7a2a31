use std::sync::Arc;

use anyhow::Result;
use axum::extract::{FromRef, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use common_auth::{JwtConfig, JwtVerifier};
use tracing::error;

use crate::area_handlers::{employee_area, partner_area};
use crate::credentials::CredentialStore;
use crate::metrics::AuthMetrics;
use crate::password::PasswordHasher;
use crate::service::Authenticator;
use crate::session_handlers::{login_user, logout_user};
use crate::tokens::TokenSigner;

/// Read-only after startup; cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub jwt_verifier: Arc<JwtVerifier>,
    pub metrics: Arc<AuthMetrics>,
}

impl FromRef<AppState> for Arc<JwtVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_verifier.clone()
    }
}

impl AppState {
    pub fn new(
        jwt: JwtConfig,
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
    ) -> Result<Self> {
        let signer = Arc::new(TokenSigner::new(jwt.clone()));
        let authenticator = Authenticator::new(store, hasher, signer)?;

        Ok(Self {
            authenticator: Arc::new(authenticator),
            jwt_verifier: Arc::new(JwtVerifier::new(jwt)),
            metrics: Arc::new(AuthMetrics::new()?),
        })
    }

    pub fn record_login_metric(&self, outcome: &str) {
        self.metrics.login_attempt(outcome);
    }

    pub fn record_logout_metric(&self) {
        self.metrics.logout();
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn metrics_endpoint(State(state): State<AppState>) -> Result<Response, axum::http::StatusCode> {
    state.metrics.render().map_err(|err| {
        error!(error = %err, "Unable to render metrics");
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/login", post(login_user))
        .route("/logout", post(logout_user))
        .route("/employee", get(employee_area))
        .route("/partners", get(partner_area))
        .with_state(state)
}
