//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the request-scoped session handle
//! - `infra/` - PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, forms, views, middleware, router
//!
//! ## Features
//! - Signup with name, email and password
//! - Login/logout with server-side sessions behind an opaque cookie token
//! - Account page and password change
//! - One-shot flash messages and post-login redirect
//! - Anti-forgery tokens on every state-changing form
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown emails cost the same as wrong passwords
//! - Only the SHA-256 digest of a session token is stored
//! - The token is renewed on every change of authentication state

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::session::Session;
pub use error::{AuthError, AuthResult};
pub use infra::{MemorySessionStore, MemoryUserRepository, PgSessionStore, PgUserRepository};
pub use presentation::{AuthAppState, CsrfForm, TemplateData, auth_router, session_layers};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
