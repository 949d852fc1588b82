//! Fixed Markdown template for release notes.
//!
//! Each record renders to one block:
//!
//! ```text
//! ## Issue <number>: <title>
//! **Created**: <created_at>
//! **Closed**: <closed_at>
//! **Closed By**: <closed_by.login>
//! ### Description
//! <body>
//! ```
//!
//! Blocks are appended to [`DOCUMENT_HEADER`] in input order with no extra
//! separator. Timestamps keep the sender's wall clock: UTC renders as
//! `2024-01-15 10:30:00 UTC`, other offsets as `2024-01-15 12:30:00 +02:00`.
//! Unset values render as empty text.

use std::fmt::{self, Write};

use chrono::{DateTime, FixedOffset};

use crate::{
    encoding::ResponseEncoding,
    error::{RenderError, RenderFailure},
    models::IssueRecord,
};

/// Literal header every document starts with.
pub const DOCUMENT_HEADER: &str = "# Release Notes";

/// Assembled release notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    text: String,
    blocks: usize,
}

impl RenderedDocument {
    /// The assembled Markdown text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of rendered issue blocks.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// Encodes the document for the response body.
    pub fn encode(&self, encoding: ResponseEncoding) -> String {
        encoding.encode(&self.text)
    }

    /// Consumes the document, returning the Markdown text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Renders a single record into its Markdown block.
///
/// [`render_document`] wraps a failure into a [`RenderError`] carrying the
/// record's position.
pub fn render_issue(issue: &IssueRecord) -> Result<String, fmt::Error> {
    let mut block = String::new();
    write_issue(&mut block, issue)?;
    Ok(block)
}

/// Renders every record under the document header.
///
/// All records are attempted. If any fail, the returned [`RenderFailure`]
/// lists each one; no partial document is produced.
pub fn render_document(issues: &[IssueRecord]) -> Result<RenderedDocument, RenderFailure> {
    let mut text = String::from(DOCUMENT_HEADER);
    let mut errors = Vec::new();

    for (index, issue) in issues.iter().enumerate() {
        match render_issue(issue) {
            Ok(block) => text.push_str(&block),
            Err(e) => {
                errors.push(RenderError { index, number: issue.number, reason: e.to_string() });
            },
        }
    }

    if errors.is_empty() {
        Ok(RenderedDocument { text, blocks: issues.len() })
    } else {
        Err(RenderFailure { errors })
    }
}

fn write_issue<W: Write>(out: &mut W, issue: &IssueRecord) -> fmt::Result {
    writeln!(out, "## Issue {}: {}", issue.number, issue.title)?;
    writeln!(out, "**Created**: {}", Timestamp(issue.created_at.as_ref()))?;
    writeln!(out, "**Closed**: {}", Timestamp(issue.closed_at.as_ref()))?;
    writeln!(out, "**Closed By**: {}", issue.closed_by_login())?;
    writeln!(out, "### Description")?;
    writeln!(out, "{}", issue.body.as_deref().unwrap_or_default())
}

struct Timestamp<'a>(Option<&'a DateTime<FixedOffset>>);

impl fmt::Display for Timestamp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) if date.offset().local_minus_utc() == 0 => {
                write!(f, "{} UTC", date.naive_local())
            },
            Some(date) => write!(f, "{date}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::ClosedBy;

    fn closed_issue() -> IssueRecord {
        IssueRecord {
            number: 12,
            title: "Panic when config is missing".to_string(),
            body: Some("Falls back to defaults now.".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap().into()),
            closed_at: Some(Utc.with_ymd_and_hms(2024, 1, 20, 8, 0, 0).unwrap().into()),
            closed_by: Some(ClosedBy::with_login("octocat")),
        }
    }

    #[test]
    fn closed_issue_fills_every_line() {
        let block = render_issue(&closed_issue()).unwrap();

        assert_eq!(
            block,
            "## Issue 12: Panic when config is missing\n\
             **Created**: 2024-01-15 10:30:00 UTC\n\
             **Closed**: 2024-01-20 08:00:00 UTC\n\
             **Closed By**: octocat\n\
             ### Description\n\
             Falls back to defaults now.\n"
        );
    }

    #[test]
    fn open_issue_leaves_closing_lines_empty() {
        let issue = IssueRecord { closed_at: None, closed_by: None, body: None, ..closed_issue() };

        let block = render_issue(&issue).unwrap();

        assert!(block.contains("**Closed**: \n"));
        assert!(block.contains("**Closed By**: \n"));
        assert!(block.ends_with("### Description\n\n"));
    }

    #[test]
    fn offset_dates_render_in_sender_wall_clock() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let issue = IssueRecord {
            created_at: Some(plus_two.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()),
            ..closed_issue()
        };

        let block = render_issue(&issue).unwrap();

        assert!(block.contains("**Created**: 2024-01-01 10:00:00 +02:00\n"));
        assert!(block.contains("**Closed**: 2024-01-20 08:00:00 UTC\n"));
    }

    #[test]
    fn record_without_fields_renders_zero_values() {
        let block = render_issue(&IssueRecord::default()).unwrap();

        assert_eq!(
            block,
            "## Issue 0: \n**Created**: \n**Closed**: \n**Closed By**: \n### Description\n\n"
        );
    }

    #[test]
    fn empty_input_renders_only_header() {
        let document = render_document(&[]).unwrap();

        assert_eq!(document.as_str(), DOCUMENT_HEADER);
        assert_eq!(document.block_count(), 0);
    }

    #[test]
    fn blocks_follow_header_in_input_order() {
        let first = closed_issue();
        let second = IssueRecord { number: 3, title: "Second".to_string(), ..closed_issue() };
        let duplicate = first.clone();

        let document = render_document(&[first.clone(), second.clone(), duplicate]).unwrap();

        let expected = format!(
            "{DOCUMENT_HEADER}{}{}{}",
            render_issue(&first).unwrap(),
            render_issue(&second).unwrap(),
            render_issue(&first).unwrap()
        );
        assert_eq!(document.as_str(), expected);
        assert_eq!(document.block_count(), 3);
        assert!(document.as_str().starts_with("# Release Notes## Issue 12:"));
    }

    #[test]
    fn markdown_encoding_returns_text_unchanged() {
        let document = render_document(&[closed_issue()]).unwrap();

        assert_eq!(document.encode(ResponseEncoding::Markdown), document.as_str());
    }
}
