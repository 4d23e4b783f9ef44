//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Session plumbing failures
#[derive(Debug, Error)]
pub enum SessionError {
    /// A handler asked for the session but the session layer is not installed
    #[error("Session layer is not installed")]
    MissingLayer,
}

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email address already belongs to an account
    #[error("Email address is already in use")]
    DuplicateEmail,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::DuplicateEmail => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Session(_)
            | AuthError::Password(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Detail stays in the source, never in the body.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        AppError::new(kind, kind.as_str()).with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Session(e) => {
                tracing::error!(error = %e, "Session error");
            }
            AuthError::Password(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("Password task failed: {err}"))
    }
}
