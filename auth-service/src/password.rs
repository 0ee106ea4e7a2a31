use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;
use thiserror::Error;
use tracing::debug;

/// Argon2id work factor. Defaults follow the crate's recommended parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    Empty,
    #[error("invalid password hashing parameters: {0}")]
    Params(String),
    #[error("failed to hash password: {0}")]
    Hash(String),
}

/// Salted, slow one-way hashing of login secrets.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| PasswordError::Params(err.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        if plaintext.is_empty() {
            return Err(PasswordError::Empty);
        }

        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| PasswordError::Hash(err.to_string()))
    }

    /// Returns false for a wrong password and for an unparseable stored hash
    /// alike, so callers cannot tell the two apart. Parameters come from the
    /// stored hash, not from `self`.
    pub fn verify(&self, plaintext: &str, password_hash: &str) -> bool {
        match PasswordHash::new(password_hash) {
            Ok(parsed) => self
                .argon2()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(err) => {
                debug!(error = %err, "stored password hash is not a valid PHC string");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("params")
    }

    #[test]
    fn hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("password123").expect("hash");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("password123", &hash));
        assert!(!hasher.verify("password124", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("clientpass").unwrap();
        let second = hasher.hash("clientpass").unwrap();

        assert_ne!(first, second);
        assert_eq!(first.len(), second.len());
        assert!(hasher.verify("clientpass", &first));
        assert!(hasher.verify("clientpass", &second));
    }

    #[test]
    fn malformed_hash_verifies_false() {
        let hasher = hasher();
        assert!(!hasher.verify("password123", ""));
        assert!(!hasher.verify("password123", "password123"));
        assert!(!hasher.verify("password123", "$2b$10$notreallyabcryptdigest"));
    }

    #[test]
    fn verification_uses_parameters_embedded_in_hash() {
        let strong = PasswordHasher::new(PasswordConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let hash = strong.hash("sponsorpass").unwrap();
        assert!(hasher().verify("sponsorpass", &hash));
    }

    #[test]
    fn rejects_empty_password_and_bad_params() {
        assert!(matches!(hasher().hash(""), Err(PasswordError::Empty)));
        let invalid = PasswordHasher::new(PasswordConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(invalid, Err(PasswordError::Params(_))));
    }

    #[test]
    fn default_config_matches_recommended_parameters() {
        let config = PasswordConfig::default();
        assert_eq!(config.memory_kib, Params::DEFAULT_M_COST);
        assert!(PasswordHasher::new(config).is_ok());
    }
}
