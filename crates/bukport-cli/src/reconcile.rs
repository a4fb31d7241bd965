//! Dedupe-and-diff reconciliation
//!
//! Decides which fetched records are genuinely new. Identity is URL-only:
//! a record whose URL the store already has is never re-imported, even when
//! its remote content has changed since.

use bukport_common::Bookmark;
use std::collections::{HashMap, HashSet};

/// Deduplicate by URL, last occurrence wins.
///
/// Callers pass records oldest-first, so "last" means "most recently
/// updated". The surviving record keeps the position of the URL's first
/// appearance.
pub fn dedupe_by_url(items: Vec<Bookmark>) -> Vec<Bookmark> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<Bookmark> = Vec::with_capacity(items.len());

    for item in items {
        match seen.get(&item.url) {
            Some(&idx) => out[idx] = item,
            None => {
                seen.insert(item.url.clone(), out.len());
                out.push(item);
            },
        }
    }

    out
}

/// Sort ascending by timestamp.
///
/// The sort is stable: records with equal timestamps keep their original
/// relative order, so applying it twice is a no-op.
pub fn sort_by_timestamp(mut items: Vec<Bookmark>) -> Vec<Bookmark> {
    items.sort_by_key(|item| item.timestamp);
    items
}

/// Records of `items` whose URL does not appear in `existing`, order
/// preserved.
pub fn difference(items: Vec<Bookmark>, existing: &[Bookmark]) -> Vec<Bookmark> {
    let existing_urls: HashSet<&str> = existing.iter().map(|item| item.url.as_str()).collect();

    items
        .into_iter()
        .filter(|item| !existing_urls.contains(item.url.as_str()))
        .collect()
}

/// The full reconciliation pipeline: dedupe, sort oldest-first, diff
/// against the store.
pub fn reconcile(service: Vec<Bookmark>, store: &[Bookmark]) -> Vec<Bookmark> {
    difference(sort_by_timestamp(dedupe_by_url(service)), store)
}
