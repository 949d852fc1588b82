//! Release notes rendering handler.
//!
//! Accepts a JSON array of issue records on `POST /markdown`, renders the
//! fixed release notes template and returns the document in the configured
//! encoding.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_TYPE, Method, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use relnotes_core::{parse_issues, render_document, NotesError, RenderedDocument, Result};
use tracing::{debug, info, instrument, warn};

use super::error_response;
use crate::AppState;

/// Renders release notes from the request body.
///
/// # Errors
///
/// Returns plain-text responses:
/// - 400: Method other than POST, body empty or unreadable, malformed JSON
/// - 500: One or more records failed to render
#[instrument(
    name = "render_markdown",
    skip(state, request),
    fields(method = %request.method(), encoding = %state.encoding)
)]
pub async fn render_markdown(State(state): State<AppState>, request: Request) -> Response {
    match render_request(&state, request).await {
        Ok(document) => {
            info!(issues = document.block_count(), "Rendered release notes");
            (
                StatusCode::OK,
                [(CONTENT_TYPE, state.encoding.content_type())],
                document.encode(state.encoding),
            )
                .into_response()
        },
        Err(e) => error_response(&e),
    }
}

async fn render_request(state: &AppState, request: Request) -> Result<RenderedDocument> {
    if request.method() != Method::POST {
        return Err(NotesError::MethodNotAllowed);
    }

    let body = read_body(request.into_body(), state.max_body_bytes).await?;
    info!(body = %String::from_utf8_lossy(&body), "Request body");

    let issues = parse_issues(&body)?;
    debug!(issues = issues.len(), "Parsed issue records");

    Ok(render_document(&issues)?)
}

/// Reads the whole body, treating read failures and oversized bodies the
/// same as an empty one.
async fn read_body(body: Body, limit: usize) -> Result<Bytes> {
    let bytes = axum::body::to_bytes(body, limit).await.map_err(|e| {
        warn!(error = %e, limit, "Failed to read request body");
        NotesError::EmptyBody
    })?;

    if bytes.is_empty() {
        return Err(NotesError::EmptyBody);
    }

    Ok(bytes)
}
