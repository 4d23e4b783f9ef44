//! Form Decoding
//!
//! Maps submitted `application/x-www-form-urlencoded` pairs onto a typed form
//! struct. Decoding is independent of validation:
//!
//! - unknown keys are ignored
//! - missing keys leave the field at its zero value (form structs are
//!   `#[serde(default)]`)
//! - a value that cannot be coerced (e.g. `expires=abc` into an integer) is a
//!   single [`FormDecodeError`], answered with 400 Bad Request. A browser form
//!   never produces that, so it is not a user-correctable 422.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// The body could not be read or does not fit the form's shape
#[derive(Debug, Error)]
pub enum FormDecodeError {
    #[error("Failed to read form body: {0}")]
    Body(String),

    #[error("Malformed form submission: {0}")]
    Shape(#[from] serde_urlencoded::de::Error),
}

impl IntoResponse for FormDecodeError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Rejected form submission");
        AppError::bad_request("Malformed form submission")
            .with_source(self)
            .into_response()
    }
}

/// Decode raw form bytes into `T`
pub fn decode_form<T: DeserializeOwned>(body: &[u8]) -> Result<T, FormDecodeError> {
    Ok(serde_urlencoded::from_bytes(body)?)
}

/// Buffer the request body for decoding, or 400
pub async fn read_form_body<S>(req: Request, state: &S) -> Result<Bytes, FormDecodeError>
where
    S: Send + Sync,
{
    Bytes::from_request(req, state)
        .await
        .map_err(|e| FormDecodeError::Body(e.body_text()))
}
