//! Single-request helpers for driving a router in tests.

use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

/// Collected response of one request.
#[derive(Debug, Clone)]
pub struct TestResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as UTF-8 text
    pub body: String,
}

impl TestResponse {
    /// Returns a header value as text, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Sends one request through `router` and collects the response.
///
/// # Panics
///
/// Panics if the request cannot be built or the body is not UTF-8.
pub async fn send(router: Router, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .expect("failed to build request");

    let response = router.oneshot(request).await.unwrap_or_else(|never| match never {});

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = String::from_utf8(bytes.to_vec()).expect("response body should be UTF-8");

    TestResponse { status, headers, body }
}

/// Posts `body` to `/markdown`.
pub async fn post_markdown(router: Router, body: impl Into<Body>) -> TestResponse {
    send(router, Method::POST, "/markdown", body).await
}
