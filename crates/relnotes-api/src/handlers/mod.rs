//! HTTP request handlers for the relnotes API.
//!
//! Errors are returned as plain text: the body is the error's message and
//! the status is 400 for request problems, 500 for rendering failures.

pub mod markdown;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use relnotes_core::NotesError;
use tracing::{error, warn};

pub use markdown::render_markdown;

/// Creates a plain-text error response and logs the failure.
fn error_response(error: &NotesError) -> Response {
    let status = if error.is_client_error() {
        warn!(code = error.code(), error = %error, "Rejected request");
        StatusCode::BAD_REQUEST
    } else {
        error!(code = error.code(), error = %error, "Request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (status, error.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use relnotes_core::{RenderError, RenderFailure};

    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let response = error_response(&NotesError::EmptyBody);

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn render_failures_map_to_server_error() {
        let failure = RenderFailure {
            errors: vec![RenderError { index: 0, number: 1, reason: "formatter error".into() }],
        };

        let response = error_response(&NotesError::Render(failure));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
