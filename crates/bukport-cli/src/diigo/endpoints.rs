//! Diigo endpoint URL builders

/// Build the paginated bookmark-listing URL
pub fn bookmarks_url(base_url: &str, key: &str, user: &str, count: u32, start: u64) -> String {
    format!(
        "{}/api/v2/bookmarks?key={}&user={}&filter=all&count={}&start={}",
        base_url,
        urlencoding::encode(key),
        urlencoding::encode(user),
        count,
        start
    )
}
