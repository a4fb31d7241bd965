//! HTTP client for the Diigo bookmark API
//!
//! Fetches the full bookmark collection through repeated paginated GET
//! requests. Any request failure is fatal; there is no retry.

use crate::diigo::{endpoints, types::DiigoBookmark};
use crate::error::{CliError, Result};
use indicatif::ProgressBar;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Default timeout for API requests in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Maximum rows the Diigo API returns per request
pub const MAX_PAGE_SIZE: u32 = 100;

/// The pagination offset advances by the service page size after every
/// non-empty page, regardless of any count override
const PAGE_STRIDE: u64 = 100;

// The Diigo v2 API requires this fixed HTTP Basic credential pair alongside
// the per-user application key.
const API_BASIC_USER: &str = "idomagal";
const API_BASIC_PASSWORD: &str = "2diigo888";

/// Fetch parameters for a run
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Rows to request per page; capped at [`MAX_PAGE_SIZE`]
    pub count: Option<u32>,

    /// Debug row cap: stop once the offset reaches this many rows
    pub limit: Option<u64>,
}

/// API client for the Diigo bookmark service
pub struct DiigoClient {
    client: Client,
    base_url: String,
    key: String,
    user: String,
}

impl DiigoClient {
    /// Create a new API client
    pub fn new(base_url: String, key: String, user: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_API_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url,
            key,
            user,
        })
    }

    /// Fetch the entire bookmark collection.
    ///
    /// Pages are concatenated in service order, which is reverse-chrono;
    /// the caller reverses the result before reconciliation, which assumes
    /// oldest-first ordering. The spinner ticks once per request.
    pub async fn fetch_all(
        &self,
        opts: &FetchOptions,
        spinner: &ProgressBar,
    ) -> Result<Vec<DiigoBookmark>> {
        let per_page = opts.count.map_or(MAX_PAGE_SIZE, |c| c.min(MAX_PAGE_SIZE));

        let mut start = 0u64;
        let mut all = Vec::new();

        loop {
            if let Some(limit) = opts.limit {
                if start >= limit {
                    debug!(start, limit, "row limit reached, stopping fetch");
                    break;
                }
            }

            let page = self.fetch_page(start, per_page).await?;
            spinner.tick();

            if page.is_empty() {
                break;
            }

            for bookmark in &page {
                info!(url = %bookmark.url, "receiving bookmark");
            }

            all.extend(page);
            start += PAGE_STRIDE;
        }

        info!(fetched = all.len(), "finished fetching bookmarks");
        Ok(all)
    }

    /// Fetch a single page of bookmarks.
    ///
    /// The end of the collection is signalled by an empty JSON array or an
    /// empty-string body.
    async fn fetch_page(&self, start: u64, count: u32) -> Result<Vec<DiigoBookmark>> {
        let url = endpoints::bookmarks_url(&self.base_url, &self.key, &self.user, count, start);

        let response = self
            .client
            .get(&url)
            .basic_auth(API_BASIC_USER, Some(API_BASIC_PASSWORD))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let trimmed = body.trim();

        if trimmed.is_empty() || trimmed == "\"\"" {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<DiigoBookmark>>(trimmed) {
            Ok(page) => Ok(page),
            Err(err) => {
                // Diigo reports request errors as an object with a message field
                if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
                    if let Some(message) = map.get("message").and_then(Value::as_str) {
                        return Err(CliError::api(message));
                    }
                }
                Err(err.into())
            },
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
