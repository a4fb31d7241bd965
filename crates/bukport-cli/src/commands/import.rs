//! The import command
//!
//! Orchestrates the whole run: read the store, fetch the service, reconcile,
//! insert the new records in one transaction.

use crate::buku::BukuDb;
use crate::diigo::{DiigoClient, FetchOptions};
use crate::error::Result;
use crate::progress;
use crate::reconcile::{reconcile, sort_by_timestamp};
use bukport_common::Bookmark;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

/// Options for one import run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Diigo API base URL
    pub api_url: String,

    /// Diigo application key
    pub key: String,

    /// Diigo username
    pub username: String,

    /// buku database path; the standard buku location when absent
    pub db_path: Option<PathBuf>,

    /// Per-page row count override
    pub count: Option<u32>,

    /// Debug row cap for the fetch loop
    pub limit: Option<u64>,

    /// Report without writing
    pub dry_run: bool,
}

/// What an import run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Records already in the store before the run
    pub existing: usize,

    /// Raw records fetched from the service
    pub fetched: usize,

    /// Records inserted (always 0 on a dry run)
    pub added: usize,
}

/// Run the import
pub async fn run(opts: ImportOptions) -> Result<ImportSummary> {
    // Read and normalize the store side first
    let db_path = match &opts.db_path {
        Some(path) => path.clone(),
        None => BukuDb::default_path()?,
    };
    let mut db = BukuDb::open(&db_path)?;

    let store = sort_by_timestamp(db.get_rec_all()?);
    info!(count = store.len(), "buku records retrieved");

    // Fetch the full remote collection
    let client = DiigoClient::new(opts.api_url.clone(), opts.key.clone(), opts.username.clone())?;
    let fetch_opts = FetchOptions {
        count: opts.count,
        limit: opts.limit,
    };

    let spinner = progress::create_spinner("Fetching bookmarks...");
    let mut raw = client.fetch_all(&fetch_opts, &spinner).await?;
    spinner.finish_and_clear();

    println!("{} {} bookmarks fetched", "✓".green(), raw.len());
    let fetched = raw.len();

    // Diigo delivers pages newest-first; reconciliation wants oldest-first
    raw.reverse();

    let mut remote: Vec<Bookmark> = Vec::with_capacity(raw.len());
    for item in &raw {
        remote.push(item.to_bookmark()?);
    }

    let new_items = reconcile(remote, &store);
    println!("Adding {} new items to buku", new_items.len());

    let added = if opts.dry_run {
        for item in &new_items {
            println!("  {} {}", "+".cyan(), item.url);
        }
        println!("{} Dry run, nothing written", "→".cyan());
        0
    } else {
        db.add_all(&new_items)?
    };

    info!(added, "import finished");
    println!("\n{} Import complete: {} added", "✓".green().bold(), added);

    Ok(ImportSummary {
        existing: store.len(),
        fetched,
        added,
    })
}
