use std::collections::HashMap;

use async_trait::async_trait;
use common_auth::Role;
use thiserror::Error;

use crate::password::{PasswordError, PasswordHasher};

/// Demo identities seeded at startup when no other store is configured.
pub const DEMO_IDENTITIES: &[(&str, &str, Role)] = &[
    ("employee1", "password123", Role::Employee),
    ("client1", "clientpass", Role::Client),
    ("sponsor1", "sponsorpass", Role::Sponsor),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("identity not found")]
    NotFound,
    #[error("duplicate username '{0}'")]
    DuplicateUsername(String),
    #[error("credential store unavailable: {0}")]
    Unavailable(String),
}

/// Lookup capability used by the login flow. A database-backed store plugs in
/// here without touching callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Identity, StoreError>;
}

/// Read-only map of identities keyed by username, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    identities: HashMap<String, Identity>,
}

impl InMemoryCredentialStore {
    pub fn new<I>(identities: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = Identity>,
    {
        let mut map = HashMap::new();
        for identity in identities {
            if map.contains_key(&identity.username) {
                return Err(StoreError::DuplicateUsername(identity.username));
            }
            map.insert(identity.username.clone(), identity);
        }
        Ok(Self { identities: map })
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Identity, StoreError> {
        self.identities
            .get(username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

pub fn demo_identities(hasher: &PasswordHasher) -> Result<Vec<Identity>, PasswordError> {
    DEMO_IDENTITIES
        .iter()
        .map(|(username, password, role)| {
            Ok(Identity {
                username: (*username).to_string(),
                password_hash: hasher.hash(password)?,
                role: *role,
            })
        })
        .collect()
}
