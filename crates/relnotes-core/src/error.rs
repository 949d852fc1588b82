//! Error types for request validation and rendering.
//!
//! Client errors (E1xxx) map to 400 responses, rendering errors (E2xxx) to
//! 500. The `Display` text of each variant is the exact plain-text body
//! returned to the caller.

use std::fmt;

use thiserror::Error;

/// Result type alias using `NotesError`.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Errors surfaced by the `/markdown` endpoint.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Request used a method other than POST (E1001).
    #[error("Only POST requests are allowed to this endpoint")]
    MethodNotAllowed,

    /// Body was empty, unreadable or over the size limit (E1002).
    #[error("Request body must not be empty")]
    EmptyBody,

    /// Body is not a JSON array of issue records (E1003).
    #[error("Error reading request body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// One or more records failed to render (E2001).
    #[error(transparent)]
    Render(#[from] RenderFailure),
}

impl NotesError {
    /// Returns the error code used in logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed => "E1001",
            Self::EmptyBody => "E1002",
            Self::MalformedJson(_) => "E1003",
            Self::Render(_) => "E2001",
        }
    }

    /// Whether the failure was caused by the request rather than the
    /// service.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Render(_))
    }
}

/// Failure to render a single record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("issue #{number} at index {index}: {reason}")]
pub struct RenderError {
    /// Position of the record in the request array
    pub index: usize,
    /// Issue number of the record
    pub number: i64,
    /// What went wrong
    pub reason: String,
}

/// Every record that failed to render in one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct RenderFailure {
    /// Failed records, in input order
    pub errors: Vec<RenderError>,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to render {} issue(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n- {error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_match_contract() {
        assert_eq!(
            NotesError::MethodNotAllowed.to_string(),
            "Only POST requests are allowed to this endpoint"
        );
        assert_eq!(NotesError::EmptyBody.to_string(), "Request body must not be empty");

        let json_error = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let message = NotesError::from(json_error).to_string();
        assert!(message.starts_with("Error reading request body: expected ident at line 1"));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(NotesError::MethodNotAllowed.code(), "E1001");
        assert_eq!(NotesError::EmptyBody.code(), "E1002");
        let failure = RenderFailure { errors: Vec::new() };
        assert_eq!(NotesError::from(failure).code(), "E2001");
    }

    #[test]
    fn render_failure_lists_every_record() {
        let failure = RenderFailure {
            errors: vec![
                RenderError { index: 0, number: 5, reason: "formatter error".to_string() },
                RenderError { index: 3, number: 9, reason: "formatter error".to_string() },
            ],
        };

        let error = NotesError::from(failure);

        assert!(!error.is_client_error());
        assert_eq!(
            error.to_string(),
            "Failed to render 2 issue(s)\n\
             - issue #5 at index 0: formatter error\n\
             - issue #9 at index 3: formatter error"
        );
    }
}
