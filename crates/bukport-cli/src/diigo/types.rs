//! Diigo wire types and normalization
//!
//! Matches the bookmark objects returned by the Diigo v2 API, plus the
//! conversion into the common [`Bookmark`] schema.

use crate::error::Result;
use bukport_common::Bookmark;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag value Diigo uses for bookmarks that carry no tags
pub const NO_TAG_SENTINEL: &str = "no_tag";

/// Timestamp format used by the Diigo API (e.g. "2008/04/30 06:28:54 +0800")
const DIIGO_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

/// A bookmark as returned by the Diigo API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiigoBookmark {
    pub url: String,

    #[serde(default)]
    pub title: String,

    /// Comma-joined tag string; "no_tag" when the bookmark has no tags
    #[serde(default)]
    pub tags: String,

    /// Creation time as a date string
    pub created_at: String,

    /// User-written description
    #[serde(default)]
    pub desc: String,

    /// Highlighted passages, each with its own comment thread
    #[serde(default)]
    pub annotations: Vec<DiigoAnnotation>,

    /// Comments on the bookmark itself
    #[serde(default)]
    pub comments: Vec<DiigoComment>,
}

/// A highlighted passage attached to a bookmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiigoAnnotation {
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub comments: Vec<DiigoComment>,
}

/// A comment on a bookmark or an annotation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiigoComment {
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub created_at: String,
}

impl DiigoBookmark {
    /// Convert into the common bookmark schema.
    ///
    /// Tags are split on commas, stripped of the "no_tag" sentinel and empty
    /// fragments, sorted, and deduplicated. A malformed created_at string is
    /// an error and aborts the run.
    pub fn to_bookmark(&self) -> Result<Bookmark> {
        let mut tags: Vec<String> = self
            .tags
            .split(',')
            .filter(|t| !t.is_empty() && *t != NO_TAG_SENTINEL)
            .map(|t| t.to_string())
            .collect();
        tags.sort();
        tags.dedup();

        Ok(Bookmark {
            url: self.url.clone(),
            title: self.title.clone(),
            tags,
            timestamp: parse_created_at(&self.created_at)?,
            desc: synthesize_desc(self),
        })
    }
}

/// Parse a Diigo created_at string.
///
/// Diigo's own format is tried first, then RFC 3339 and RFC 2822 as
/// fallbacks for older payloads.
pub fn parse_created_at(s: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_str(s, DIIGO_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .or_else(|_| DateTime::parse_from_rfc2822(s))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Synthesize the description text for a bookmark.
///
/// Concatenates, in order: the description block, the annotations block
/// (each quote followed by its comments), and the top-level comments block.
/// Each block is the empty string when its source data is absent.
pub fn synthesize_desc(item: &DiigoBookmark) -> String {
    format!(
        "{}{}{}",
        description_block(item),
        annotations_block(&item.annotations),
        comments_block(&item.comments)
    )
}

fn description_block(item: &DiigoBookmark) -> String {
    if item.desc.is_empty() {
        String::new()
    } else {
        format!("description:\n{}\n", item.desc)
    }
}

fn annotations_block(annotations: &[DiigoAnnotation]) -> String {
    if annotations.is_empty() {
        return String::new();
    }

    let mut out = String::from("\nannotations:\n");
    for annotation in annotations {
        out.push_str(&format!("quote\n{}\n", annotation.content));
        out.push_str(&comments_block(&annotation.comments));
    }
    out
}

fn comments_block(comments: &[DiigoComment]) -> String {
    if comments.is_empty() {
        return String::new();
    }

    let mut out = String::from("comments:\n");
    for comment in comments {
        out.push_str("comment\n");
        out.push_str(&format!(
            "{} --{}, {}\n",
            comment.content, comment.user, comment.created_at
        ));
    }
    out
}
