//! Test data builders for issue records.
//!
//! Builders start from a fixed, deterministic closed issue so rendered
//! output is stable across runs.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use relnotes_core::{ClosedBy, IssueRecord};
use serde_json::{json, Value};

/// Builder for test issue records.
#[derive(Debug, Clone)]
pub struct IssueBuilder {
    number: i64,
    title: String,
    body: Option<String>,
    created_at: Option<DateTime<FixedOffset>>,
    closed_at: Option<DateTime<FixedOffset>>,
    closed_by: Option<ClosedBy>,
}

impl IssueBuilder {
    /// Creates a closed issue with the given number and deterministic
    /// defaults.
    pub fn closed(number: i64) -> Self {
        Self {
            number,
            title: format!("Issue {number}"),
            body: Some(format!("Description of issue {number}.")),
            created_at: Some(fixed_time(2024, 1, 15)),
            closed_at: Some(fixed_time(2024, 1, 20)),
            closed_by: Some(ClosedBy::with_login("octocat")),
        }
    }

    /// Creates an open issue: no close date and no closing actor.
    pub fn open(number: i64) -> Self {
        Self { closed_at: None, closed_by: None, ..Self::closed(number) }
    }

    /// Sets the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Removes the description body.
    #[must_use]
    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<FixedOffset>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Removes both the creation and the close time.
    #[must_use]
    pub fn without_dates(mut self) -> Self {
        self.created_at = None;
        self.closed_at = None;
        self
    }

    /// Sets the login of the closing actor.
    #[must_use]
    pub fn closed_by(mut self, login: impl Into<String>) -> Self {
        self.closed_by = Some(ClosedBy::with_login(login));
        self
    }

    /// Builds the issue record.
    pub fn build(self) -> IssueRecord {
        IssueRecord {
            number: self.number,
            title: self.title,
            body: self.body,
            created_at: self.created_at,
            closed_at: self.closed_at,
            closed_by: self.closed_by,
        }
    }

    /// Builds the record in its wire representation.
    pub fn to_json(&self) -> Value {
        json!({
            "number": self.number,
            "title": self.title,
            "body": self.body,
            "created_at": self.created_at.map(|t| t.to_rfc3339()),
            "closed_at": self.closed_at.map(|t| t.to_rfc3339()),
            "closed_by": self.closed_by.as_ref().map(|actor| Value::Object(actor.0.clone())),
        })
    }
}

/// Serializes builders into a request body.
pub fn issues_body(issues: &[IssueBuilder]) -> String {
    Value::Array(issues.iter().map(IssueBuilder::to_json).collect()).to_string()
}

fn fixed_time(year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).single().unwrap_or_default().into()
}
