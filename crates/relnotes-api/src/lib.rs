//! relnotes HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;

use relnotes_core::ResponseEncoding;

pub use config::Config;
pub use server::{create_router, serve, shutdown_signal, start_server};

/// Immutable per-process settings shared by every request.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    /// Encoding applied to rendered documents
    pub encoding: ResponseEncoding,
    /// Largest request body read before rejecting the request
    pub max_body_bytes: usize,
}

impl AppState {
    /// Default body limit of 10 MiB.
    pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

    /// Creates state with the given encoding and the default body limit.
    pub fn new(encoding: ResponseEncoding) -> Self {
        Self { encoding, max_body_bytes: Self::DEFAULT_MAX_BODY_BYTES }
    }

    /// Overrides the body size limit.
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ResponseEncoding::default())
    }
}

impl From<&Config> for AppState {
    fn from(config: &Config) -> Self {
        Self { encoding: config.response_encoding, max_body_bytes: config.max_body_bytes }
    }
}
