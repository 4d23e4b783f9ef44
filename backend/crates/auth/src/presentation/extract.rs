//! Request Extractors
//!
//! - [`Session`] from the request extensions (installed by the session layer)
//! - [`CsrfForm`]: a decoded form whose anti-forgery token matched the session

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::{HeaderName, request::Parts};
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::form::{decode_form, read_form_body};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::application::session::Session;
use crate::error::{AuthError, SessionError};

/// Hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";
/// Header alternative for script-driven submissions
pub const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthError::Session(SessionError::MissingLayer))
    }
}

#[derive(Debug, Error)]
pub enum CsrfError {
    #[error("Anti-forgery token missing")]
    Missing,

    #[error("Anti-forgery token mismatch")]
    Mismatch,
}

impl IntoResponse for CsrfError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Rejected form submission");
        AppError::bad_request("Invalid anti-forgery token")
            .with_source(self)
            .into_response()
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CsrfField {
    csrf_token: String,
}

/// Extractor: form body decoded into `T` after the anti-forgery check passed
#[derive(Debug)]
pub struct CsrfForm<T>(pub T);

impl<S, T> FromRequest<S> for CsrfForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let session = req
            .extensions()
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AuthError::Session(SessionError::MissingLayer).into_response())?;

        let header_token = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let body = read_form_body(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let form: T = decode_form(&body).map_err(IntoResponse::into_response)?;

        let submitted = match header_token {
            Some(token) => token,
            None => {
                decode_form::<CsrfField>(&body)
                    .map_err(IntoResponse::into_response)?
                    .csrf_token
            }
        };

        if submitted.is_empty() {
            return Err(CsrfError::Missing.into_response());
        }
        if !session.csrf_matches(&submitted) {
            return Err(CsrfError::Mismatch.into_response());
        }

        Ok(CsrfForm(form))
    }
}
