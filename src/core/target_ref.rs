//! Target identification - WHICH rule instance (`//base/path:name`).
//!
//! A TargetRef uniquely identifies a build rule instance in the target graph.
//! Identity is by value, so two refs parsed from the same string are equal,
//! hash the same, and sort next to each other.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A unique, immutable reference to a build target.
///
/// Cheap to clone (shared `Arc<str>`) and safe to share across threads.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetRef {
    full: Arc<str>,
}

/// Error returned when a string is not a valid target reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetRefParseError {
    #[error("target `{0}` must start with `//`")]
    MissingRoot(String),

    #[error("target `{0}` must contain exactly one `:`")]
    BadSeparator(String),

    #[error("target `{0}` has an empty name")]
    EmptyName(String),

    #[error("target `{input}` contains invalid character `{ch}`")]
    InvalidChar { input: String, ch: char },

    #[error("target `{0}` has an empty, `.` or `..` path segment")]
    BadSegment(String),
}

fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ',' | '=' | '+' | '/')
}

fn is_valid_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/')
}

/// Every `/`-separated segment must name a real directory entry, so the
/// ref always maps to a relative path below its root.
fn has_plain_segments(s: &str) -> bool {
    s.split('/').all(|seg| !matches!(seg, "" | "." | ".."))
}

impl TargetRef {
    /// Parse a fully qualified target reference such as `//res/base:base`.
    pub fn parse(s: &str) -> Result<Self, TargetRefParseError> {
        let rest = s
            .strip_prefix("//")
            .ok_or_else(|| TargetRefParseError::MissingRoot(s.to_string()))?;

        let mut parts = rest.split(':');
        let (base, name) = match (parts.next(), parts.next(), parts.next()) {
            (Some(base), Some(name), None) => (base, name),
            _ => return Err(TargetRefParseError::BadSeparator(s.to_string())),
        };

        if name.is_empty() {
            return Err(TargetRefParseError::EmptyName(s.to_string()));
        }

        if let Some(ch) = base.chars().find(|c| !is_valid_path_char(*c)) {
            return Err(TargetRefParseError::InvalidChar {
                input: s.to_string(),
                ch,
            });
        }
        if let Some(ch) = name.chars().find(|c| !is_valid_name_char(*c)) {
            return Err(TargetRefParseError::InvalidChar {
                input: s.to_string(),
                ch,
            });
        }

        if (!base.is_empty() && !has_plain_segments(base)) || !has_plain_segments(name) {
            return Err(TargetRefParseError::BadSegment(s.to_string()));
        }

        Ok(TargetRef { full: Arc::from(s) })
    }

    /// The full `//base/path:name` form.
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The directory part, without the leading `//` (may be empty).
    pub fn base_path(&self) -> &str {
        let rest = &self.full[2..];
        match rest.find(':') {
            Some(idx) => &rest[..idx],
            None => rest,
        }
    }

    /// The rule name after the `:`.
    pub fn short_name(&self) -> &str {
        match self.full.rfind(':') {
            Some(idx) => &self.full[idx + 1..],
            None => &self.full,
        }
    }
}

impl FromStr for TargetRef {
    type Err = TargetRefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetRef::parse(s)
    }
}

impl fmt::Debug for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetRef({})", self.full)
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl Serialize for TargetRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.full)
    }
}

impl<'de> Deserialize<'de> for TargetRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TargetRef::parse(&s).map_err(serde::de::Error::custom)
    }
}
