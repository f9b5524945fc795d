//! Cursor pagination types
//!
//! The paginated transactions endpoint hands out one page at a time together
//! with an opaque cursor for the following page. A `null` cursor marks the
//! last page.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Cursor value the backend expects for the first page.
pub const FIRST_PAGE: &str = "0";

/// Opaque token identifying the next page to fetch.
///
/// Backends send cursors either as JSON numbers or strings; both are
/// normalized to their string form so that equal cursors compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    /// Create a cursor from its string form.
    #[allow(dead_code)]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token sent back to the backend.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Cursor(n.to_string()),
            Raw::Text(s) => Cursor(s),
        })
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in backend order
    pub data: Vec<T>,

    /// Cursor for the following page; `None` on the last page
    #[serde(default)]
    pub next_page: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page.
    #[allow(dead_code)]
    pub fn new(data: Vec<T>, next_page: Option<Cursor>) -> Self {
        Self { data, next_page }
    }

    /// Check if there are more pages to fetch.
    #[allow(dead_code)]
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}
