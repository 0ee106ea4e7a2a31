pub mod app;
pub mod area_handlers;
pub mod config;
pub mod credentials;
pub mod metrics;
pub mod password;
pub mod service;
pub mod session_handlers;
pub mod tokens;

pub use app::{router, AppState};
