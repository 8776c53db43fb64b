//! Opaque share identifier.
//!
//! Share ids are generated server-side and travel in URLs, so the
//! well-formedness check only admits the unpadded URL-safe base64 alphabet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on identifier length accepted from a URL.
pub const MAX_SHARE_ID_LEN: usize = 64;

/// The public lookup key of a share record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(String);

impl ShareId {
    /// Wraps an identifier string without checking it.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether `candidate` is non-empty, at most [`MAX_SHARE_ID_LEN`] long,
    /// and made only of `A-Z a-z 0-9 - _`.
    pub fn is_well_formed(candidate: &str) -> bool {
        !candidate.is_empty()
            && candidate.len() <= MAX_SHARE_ID_LEN
            && candidate
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ShareId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ShareId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for ShareId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
