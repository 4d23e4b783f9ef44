//! Snippet Error Types
//!
//! Snippet-specific error variants that integrate with the unified
//! `AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Snippet-specific result type alias
pub type SnippetResult<T> = Result<T, SnippetError>;

#[derive(Debug, Error)]
pub enum SnippetError {
    /// No such snippet, or it has expired
    #[error("Snippet not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SnippetError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SnippetError::NotFound => ErrorKind::NotFound,
            SnippetError::Database(_) | SnippetError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError. Detail stays in the source, never in the body.
    pub fn into_app_error(self) -> AppError {
        let kind = self.kind();
        AppError::new(kind, kind.as_str()).with_source(self)
    }

    fn log(&self) {
        match self {
            SnippetError::Database(e) => {
                tracing::error!(error = %e, "Snippet database error");
            }
            SnippetError::Internal(msg) => {
                tracing::error!(message = %msg, "Snippet internal error");
            }
            SnippetError::NotFound => {
                tracing::debug!("Snippet not found");
            }
        }
    }
}

impl IntoResponse for SnippetError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
