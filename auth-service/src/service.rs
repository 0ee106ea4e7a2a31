use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::credentials::{CredentialStore, StoreError};
use crate::password::{PasswordError, PasswordHasher};
use crate::tokens::{IssuedToken, TokenSigner};

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{message}")]
    BadRequest {
        code: &'static str,
        message: &'static str,
    },
    /// Unknown username and wrong password both end up here.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("internal error: {0}")]
    Internal(String),
}

impl LoginError {
    pub fn outcome(&self) -> &'static str {
        match self {
            LoginError::BadRequest { .. } => "bad_request",
            LoginError::InvalidCredentials => "invalid_credentials",
            LoginError::Internal(_) => "error",
        }
    }
}

/// Login use case: credential lookup, password check, token issuance.
///
/// Holds no session state. Logout is a plain acknowledgement because issued
/// tokens are never tracked server-side.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    signer: Arc<TokenSigner>,
    /// Verified against when the username is unknown so both failure paths
    /// do the same amount of work.
    decoy_hash: Arc<str>,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        signer: Arc<TokenSigner>,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = hasher.hash(&Uuid::new_v4().to_string())?;
        Ok(Self {
            store,
            hasher,
            signer,
            decoy_hash: decoy_hash.into(),
        })
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, LoginError> {
        if username.trim().is_empty() {
            return Err(LoginError::BadRequest {
                code: "missing_username",
                message: "username is required",
            });
        }
        if password.is_empty() {
            return Err(LoginError::BadRequest {
                code: "missing_password",
                message: "password is required",
            });
        }

        let identity = match self.store.find_by_username(username).await {
            Ok(identity) => Some(identity),
            Err(StoreError::NotFound) => None,
            Err(err) => {
                warn!(error = %err, "credential lookup failed");
                return Err(LoginError::Internal(err.to_string()));
            }
        };

        let stored_hash = identity
            .as_ref()
            .map(|identity| Arc::<str>::from(identity.password_hash.as_str()))
            .unwrap_or_else(|| self.decoy_hash.clone());
        let verified = self.verify_off_runtime(password, stored_hash).await?;

        let identity = match identity {
            Some(identity) if verified => identity,
            _ => {
                info!(username, "login rejected");
                return Err(LoginError::InvalidCredentials);
            }
        };

        let issued = self
            .signer
            .issue(&identity.username, identity.role)
            .map_err(|err| LoginError::Internal(err.to_string()))?;
        info!(username = %identity.username, role = %identity.role, "login succeeded");
        Ok(issued)
    }

    /// The hash is CPU-bound and deliberately slow; keep it off the async workers.
    async fn verify_off_runtime(
        &self,
        password: &str,
        stored_hash: Arc<str>,
    ) -> Result<bool, LoginError> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|err| LoginError::Internal(format!("password verification task failed: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{demo_identities, Identity, InMemoryCredentialStore};
    use crate::password::PasswordConfig;
    use async_trait::async_trait;
    use common_auth::{JwtConfig, JwtVerifier, Role};

    const SECRET: &str = "authenticator-secret-long-enough-01";

    fn hasher() -> Arc<PasswordHasher> {
        Arc::new(
            PasswordHasher::new(PasswordConfig {
                memory_kib: 1024,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        )
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig::new(SECRET, "auth-service", 1).unwrap()
    }

    fn authenticator_with(store: Arc<dyn CredentialStore>) -> Authenticator {
        let signer = Arc::new(TokenSigner::new(jwt_config()));
        Authenticator::new(store, hasher(), signer).unwrap()
    }

    fn demo_authenticator() -> Authenticator {
        let store = InMemoryCredentialStore::new(demo_identities(&hasher()).unwrap()).unwrap();
        authenticator_with(Arc::new(store))
    }

    struct UnavailableStore;

    #[async_trait]
    impl CredentialStore for UnavailableStore {
        async fn find_by_username(&self, _username: &str) -> Result<Identity, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_token_for_stored_role() {
        let authenticator = demo_authenticator();
        let verifier = JwtVerifier::new(jwt_config());

        let issued = authenticator
            .authenticate("employee1", "password123")
            .await
            .expect("login succeeds");
        let claims = verifier.validate(&issued.token).expect("token validates");

        assert_eq!(claims.subject, "employee1");
        assert_eq!(claims.role, Role::Employee);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let authenticator = demo_authenticator();

        let wrong_password = authenticator.authenticate("employee1", "wrongpass").await;
        let unknown_user = authenticator.authenticate("nobody", "password123").await;

        assert!(matches!(wrong_password, Err(LoginError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn blank_fields_are_bad_requests() {
        let authenticator = demo_authenticator();

        let err = authenticator.authenticate("", "password123").await.unwrap_err();
        assert!(matches!(err, LoginError::BadRequest { code: "missing_username", .. }));

        let err = authenticator.authenticate("employee1", "").await.unwrap_err();
        assert!(matches!(err, LoginError::BadRequest { code: "missing_password", .. }));
        assert_eq!(err.outcome(), "bad_request");
    }

    #[tokio::test]
    async fn corrupt_stored_hash_is_invalid_credentials() {
        let store = InMemoryCredentialStore::new([Identity {
            username: "client1".into(),
            password_hash: "not-a-phc-string".into(),
            role: Role::Client,
        }])
        .unwrap();
        let authenticator = authenticator_with(Arc::new(store));

        let err = authenticator.authenticate("client1", "clientpass").await.unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn store_outage_is_internal() {
        let authenticator = authenticator_with(Arc::new(UnavailableStore));
        let err = authenticator.authenticate("client1", "clientpass").await.unwrap_err();
        assert!(matches!(err, LoginError::Internal(_)));
        assert_eq!(err.outcome(), "error");
    }
}
