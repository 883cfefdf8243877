pub mod auth;

pub use auth::{ApiKeyGate, AuthFailure, AuthResult, RequireApiKey};
