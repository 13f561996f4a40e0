//! Post records shipped with the archive page.
//!
//! The list is produced elsewhere (the static build that renders the page) and
//! arrives as a JSON array with camelCase keys. Records are immutable once
//! loaded and the collection keeps the order it was given in.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single blog entry as exposed to the archive search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResource {
    pub title: String,
    pub url: String,
    pub date_timestamp: String,
    pub date_human_readable: String,
    #[serde(default)]
    pub excerpt: Option<String>,
}

impl SearchResource {
    /// Excerpt text, or the empty string when the record has none.
    pub fn excerpt_or_empty(&self) -> &str {
        self.excerpt.as_deref().unwrap_or_default()
    }
}

/// Ordered, shared collection of post records.
///
/// Cloning is cheap; every clone observes the same records in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resources {
    records: Arc<[SearchResource]>,
}

impl Resources {
    pub fn new(records: Vec<SearchResource>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn as_slice(&self) -> &[SearchResource] {
        &self.records
    }
}

impl Deref for Resources {
    type Target = [SearchResource];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<SearchResource>> for Resources {
    fn from(records: Vec<SearchResource>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<SearchResource> for Resources {
    fn from_iter<T: IntoIterator<Item = SearchResource>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
