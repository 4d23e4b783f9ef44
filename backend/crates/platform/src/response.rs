//! Response Mode
//!
//! Every page-producing endpoint answers in one of two modes:
//!
//! - **Full**: a plain browser navigation. Success is `303 See Other` to the
//!   next page; validation failure re-renders the whole page with 422.
//! - **Enhanced**: an htmx request (`HX-Request: true`). Success is 200 with an
//!   `HX-Redirect` header; validation failure returns only the form fragment
//!   with 422 so the client can swap it in place.

use std::convert::Infallible;

use askama::Template;
use axum::extract::FromRequestParts;
use axum::http::{HeaderName, HeaderValue, StatusCode, header, request::Parts};
use axum::response::{IntoResponse, Response};

use kernel::error::app_error::AppError;

use crate::template::HtmlTemplate;

pub const HX_REQUEST: HeaderName = HeaderName::from_static("hx-request");
pub const HX_REDIRECT: HeaderName = HeaderName::from_static("hx-redirect");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Full,
    Enhanced,
}

impl ResponseMode {
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Self {
        match headers.get(HX_REQUEST) {
            Some(v) if v.as_bytes() == b"true" => Self::Enhanced,
            _ => Self::Full,
        }
    }

    /// Render the view matching this mode. Only the chosen closure runs, so
    /// one-shot session values (the flash) are consumed only by full pages.
    pub fn render<P, F>(
        self,
        status: StatusCode,
        full: impl FnOnce() -> P,
        fragment: impl FnOnce() -> F,
    ) -> Response
    where
        P: Template,
        F: Template,
    {
        let body = match self {
            Self::Full => HtmlTemplate(full()).into_response(),
            Self::Enhanced => HtmlTemplate(fragment()).into_response(),
        };
        if body.status().is_success() {
            (status, body).into_response()
        } else {
            body
        }
    }

    /// Navigate to `path`
    pub fn redirect(self, path: &str) -> Response {
        let Ok(location) = HeaderValue::from_str(path) else {
            tracing::error!(path, "Redirect target is not a valid header value");
            return AppError::internal("Invalid redirect target").into_response();
        };
        match self {
            Self::Full => (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response(),
            Self::Enhanced => (StatusCode::OK, [(HX_REDIRECT, location)]).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for ResponseMode
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
