pub mod claims;
pub mod config;
pub mod error;
pub mod extractors;
pub mod guards;
pub mod roles;
pub mod verifier;

pub use claims::{Claims, ClaimsRepr};
pub use config::{ConfigError, JwtConfig, MIN_SECRET_LENGTH};
pub use error::{AuthError, AuthResult, TokenError};
pub use extractors::AuthContext;
pub use guards::{authorize, ensure_role};
pub use roles::{Role, UnknownRole, ALL_ROLES};
pub use verifier::{JwtVerifier, TOKEN_ALGORITHM};
