use anyhow::{anyhow, Context, Result};
use common_auth::JwtConfig;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::password::PasswordConfig;

const DEFAULT_ISSUER: &str = "auth-service";
const DEFAULT_TTL_HOURS: u32 = 1;
const DEFAULT_PORT: u16 = 8085;
const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:5173",
];

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub seed_demo_identities: bool,
    pub cors_origins: Vec<String>,
}

impl ServiceConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

/// Reads the process environment once at startup.
pub fn load_service_config() -> Result<ServiceConfig> {
    config_from_lookup(|key| env::var(key).ok())
}

pub(crate) fn config_from_lookup<F>(lookup: F) -> Result<ServiceConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let secret = lookup("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;
    let issuer = lookup("JWT_ISSUER")
        .and_then(|value| normalize_optional(&value))
        .unwrap_or_else(|| DEFAULT_ISSUER.to_string());
    let ttl_hours = parse_or("JWT_TTL_HOURS", &lookup, DEFAULT_TTL_HOURS)?;
    let jwt = JwtConfig::new(secret, issuer, ttl_hours).context("Invalid token configuration")?;

    let defaults = PasswordConfig::default();
    let password = PasswordConfig {
        memory_kib: parse_or("AUTH_PASSWORD_MEMORY_KIB", &lookup, defaults.memory_kib)?,
        iterations: parse_or("AUTH_PASSWORD_ITERATIONS", &lookup, defaults.iterations)?,
        parallelism: parse_or("AUTH_PASSWORD_PARALLELISM", &lookup, defaults.parallelism)?,
    };

    let host = lookup("HOST")
        .and_then(|value| normalize_optional(&value))
        .unwrap_or_else(|| "0.0.0.0".to_string());
    let host: IpAddr = host
        .parse()
        .with_context(|| format!("Invalid HOST '{host}'"))?;
    let port = parse_or("PORT", &lookup, DEFAULT_PORT)?;

    let seed_demo_identities = lookup("AUTH_SEED_DEMO_IDENTITIES")
        .map(|value| is_truthy(&value))
        .unwrap_or(true);

    let cors_origins = lookup("AUTH_CORS_ORIGINS")
        .map(|value| parse_list(&value))
        .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect());

    Ok(ServiceConfig {
        host,
        port,
        jwt,
        password,
        seed_demo_identities,
        cors_origins,
    })
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).and_then(|value| normalize_optional(&value)) {
        Some(raw) => raw
            .parse()
            .map_err(|err| anyhow!("Invalid {key} '{raw}': {err}")),
        None => Ok(default),
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c == ';' || c == ' ')
        .filter_map(normalize_optional)
        .collect()
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
