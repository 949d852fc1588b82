//! Core types for rendering issue-tracker records into release notes.
//!
//! Provides the issue record model, the fixed Markdown template, the
//! response encodings and the error taxonomy shared by the HTTP layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod encoding;
pub mod error;
pub mod models;
pub mod render;

pub use encoding::{encode_binary_digits, ResponseEncoding};
pub use error::{NotesError, RenderError, RenderFailure, Result};
pub use models::{parse_issues, ClosedBy, IssueRecord};
pub use render::{render_document, render_issue, RenderedDocument, DOCUMENT_HEADER};
