//! Response body encodings.
//!
//! `binary-digits` writes each character's code point in base two with no
//! padding and no separator, so `# R` becomes `100011` `100000` `1010010`
//! run together; it is the default. `markdown` returns the document as
//! UTF-8 text.

use std::{fmt, fmt::Write, str::FromStr};

use serde::{Deserialize, Serialize};

/// How the rendered document is written to the response body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseEncoding {
    /// Concatenated base-2 code points
    #[default]
    BinaryDigits,
    /// Plain Markdown text
    Markdown,
}

impl ResponseEncoding {
    /// Encodes the assembled document.
    pub fn encode(self, text: &str) -> String {
        match self {
            Self::BinaryDigits => encode_binary_digits(text),
            Self::Markdown => text.to_string(),
        }
    }

    /// `Content-Type` header value for bodies in this encoding.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::BinaryDigits => "text/plain; charset=utf-8",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }

    /// Configuration name of the encoding.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BinaryDigits => "binary-digits",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ResponseEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary-digits" => Ok(Self::BinaryDigits),
            "markdown" => Ok(Self::Markdown),
            other => Err(format!("unknown response encoding: {other}")),
        }
    }
}

/// Writes each character's code point in base two, concatenated in
/// character order.
pub fn encode_binary_digits(text: &str) -> String {
    // ASCII code points take at most seven digits.
    let mut out = String::with_capacity(text.len() * 7);
    for c in text.chars() {
        write!(out, "{:b}", u32::from(c)).ok();
    }
    out
}
