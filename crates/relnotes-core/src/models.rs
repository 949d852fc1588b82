//! Issue-tracker records accepted by the rendering endpoint.
//!
//! Field names follow the issue tracker's REST representation (`number`,
//! `created_at`, ...). The camelCase names used by older clients are
//! accepted as aliases.
//!
//! Missing or null fields decode to their zero value: `0`, empty text or
//! no date. Only a value of the wrong JSON type rejects the record.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Parses a request body as a JSON array of issue records.
pub fn parse_issues(body: &[u8]) -> Result<Vec<IssueRecord>> {
    Ok(serde_json::from_slice(body)?)
}

/// One entry of the request's JSON array.
///
/// Records carry no identity beyond `number`; duplicates are rendered
/// independently, in input order.
///
/// # Example
///
/// ```
/// use relnotes_core::IssueRecord;
///
/// let issue: IssueRecord = serde_json::from_str(
///     r#"{"number": 7, "title": "Fix login", "created_at": "2024-01-15T10:30:00Z"}"#,
/// )
/// .unwrap();
/// assert_eq!(issue.number, 7);
/// assert!(issue.closed_at.is_none());
///
/// let empty: IssueRecord = serde_json::from_str("{}").unwrap();
/// assert_eq!(empty.number, 0);
/// assert!(empty.created_at.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue number within its repository
    #[serde(default, alias = "issueNumber", deserialize_with = "null_as_default")]
    pub number: i64,
    /// One-line summary
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-form description, absent or null for issues without one
    #[serde(default)]
    pub body: Option<String>,
    /// When the issue was opened, with the sender's UTC offset
    #[serde(default, alias = "creationDate")]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// When the issue was closed, `None` while open
    #[serde(default, alias = "closedDate")]
    pub closed_at: Option<DateTime<FixedOffset>>,
    /// Actor that closed the issue, `None` while open
    #[serde(default, alias = "closedBy")]
    pub closed_by: Option<ClosedBy>,
}

impl IssueRecord {
    /// Login of the closing actor, empty when the issue is unclosed or the
    /// actor carries no login.
    pub fn closed_by_login(&self) -> String {
        self.closed_by.as_ref().map(ClosedBy::login).unwrap_or_default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Loosely-typed actor object as sent by the issue tracker.
///
/// Only `login` is read; every other key is kept but ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosedBy(pub Map<String, Value>);

impl ClosedBy {
    /// Creates an actor object holding only a login.
    pub fn with_login(login: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("login".to_string(), Value::String(login.into()));
        Self(fields)
    }

    /// Returns the login as text.
    ///
    /// Strings render verbatim, a missing or null login renders empty and
    /// any other JSON value renders as compact JSON.
    pub fn login(&self) -> String {
        match self.0.get("login") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(login)) => login.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl fmt::Display for ClosedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.login())
    }
}
