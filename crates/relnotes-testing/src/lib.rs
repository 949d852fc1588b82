//! Test infrastructure for relnotes.
//!
//! Provides issue record builders and helpers that drive a router with a
//! single request and collect the response.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod fixtures;
pub mod http;

pub use fixtures::{issues_body, IssueBuilder};
pub use http::{post_markdown, send, TestResponse};
