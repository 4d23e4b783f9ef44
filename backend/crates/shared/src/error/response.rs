//! HTTP response for [`AppError`] (feature `axum`)

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::app_error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            tracing::error!(
                status = self.status_code(),
                message = %self.message(),
                source = %self.source_chain(),
                "Server error"
            );
        } else {
            tracing::debug!(status = self.status_code(), message = %self.message(), "Client error");
        }

        // Visitors only ever see the reason phrase; details stay in the logs.
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.kind().as_str(),
        )
            .into_response()
    }
}
