//! The normalized bookmark record
//!
//! Both sources (the Diigo API and the buku database) are converted into
//! [`Bookmark`] before any comparison happens. The URL is the sole identity
//! key; every other field is along for the ride.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bookmark in the common schema.
///
/// Invariants:
/// - `url` is the identity key; two records with the same URL are the same
///   logical bookmark regardless of other fields.
/// - `tags` is sorted, deduplicated, and never contains an empty tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub desc: String,
}

impl Bookmark {
    /// Build a bookmark from a buku `bookmarks` table row.
    ///
    /// buku stores no creation time; the rowid preserves insertion order, so
    /// it is mapped onto the timestamp axis at second granularity.
    pub fn from_buku_row(id: i64, url: String, title: String, tagstring: &str, desc: String) -> Self {
        Self {
            url,
            title,
            tags: tagstring_to_tags(tagstring),
            timestamp: timestamp_from_rowid(id),
            desc,
        }
    }
}

/// Decode buku's tagstring format into a sorted tag list.
///
/// buku wraps tag lists in leading and trailing separators (`,a,b,`), and an
/// empty tag list is a lone `,`. The wrapping separators produce empty
/// fragments at both ends of the split, which are dropped.
pub fn tagstring_to_tags(tagstring: &str) -> Vec<String> {
    let parts: Vec<&str> = tagstring.split(',').collect();
    if parts.len() <= 2 {
        return Vec::new();
    }
    let mut tags: Vec<String> = parts[1..parts.len() - 1]
        .iter()
        .map(|t| t.to_string())
        .collect();
    tags.sort();
    tags.dedup();
    tags
}

/// Encode a tag list into buku's tagstring format.
///
/// An empty list encodes as a single separator; a non-empty list is joined
/// by commas and wrapped with leading and trailing commas.
pub fn tags_to_tagstring(tags: &[String]) -> String {
    if tags.is_empty() {
        return ",".to_string();
    }
    format!(",{},", tags.join(","))
}

/// Map a buku rowid onto the timestamp axis.
pub fn timestamp_from_rowid(id: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(id, 0).unwrap_or(DateTime::UNIX_EPOCH)
}
