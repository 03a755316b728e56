//! Middleware del sistema
//!
//! Este módulo contiene el middleware de autenticación JWT y CORS.

pub mod auth;
pub mod cors;

pub use auth::{require_auth, AuthenticatedUser};
pub use cors::cors_layer;
