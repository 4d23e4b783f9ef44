//! Error Kind
//!
//! [`ErrorKind`] classifies failures by the status the visitor receives.

use serde::Serialize;

/// Error classification.
///
/// The browser-facing status contract uses 400 for malformed submissions,
/// 404, 422 for validation re-renders and 500 for everything unexpected. The
/// remaining kinds classify domain errors that handlers normally turn into a
/// form error before they ever reach the response.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Undecodable form body, failed anti-forgery check
    BadRequest,
    /// Credentials rejected
    Unauthorized,
    NotFound,
    /// Unique value already taken
    Conflict,
    /// Submission failed validation
    UnprocessableEntity,
    /// Storage, hashing or wiring failure
    InternalServerError,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::InternalServerError => 500,
        }
    }

    /// Reason phrase, the only thing a visitor ever sees of an error
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::InternalServerError => "Internal Server Error",
        }
    }

    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
