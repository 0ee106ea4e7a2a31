use anyhow::Context;
use auth_service::config::load_service_config;
use auth_service::credentials::{demo_identities, CredentialStore, InMemoryCredentialStore};
use auth_service::password::PasswordHasher;
use auth_service::{router, AppState};
use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_service_config()?;
    let hasher = Arc::new(PasswordHasher::new(config.password)?);

    let store = if config.seed_demo_identities {
        let store = InMemoryCredentialStore::new(demo_identities(&hasher)?)?;
        info!(identities = store.len(), "seeded demo identities");
        store
    } else {
        warn!("AUTH_SEED_DEMO_IDENTITIES disabled; credential store is empty");
        InMemoryCredentialStore::default()
    };
    let store: Arc<dyn CredentialStore> = Arc::new(store);

    let state = AppState::new(config.jwt.clone(), store, hasher)?;

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE, AUTHORIZATION]);

    let app = router(state).layer(cors);

    let addr = config.socket_addr();
    info!(%addr, issuer = config.jwt.issuer(), ttl_hours = config.jwt.ttl_hours(), "starting auth-service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
