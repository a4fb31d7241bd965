//! bukport CLI Library
//!
//! One-shot importer that migrates bookmarks from the Diigo bookmarking
//! service into a local buku database.
//!
//! # Overview
//!
//! The run is strictly sequential:
//!
//! 1. Read and normalize every record already in the buku database
//! 2. Fetch all Diigo bookmarks through the paginated API
//! 3. Normalize, deduplicate by URL (newer wins), sort oldest-first
//! 4. Insert every record whose URL the store does not already have,
//!    in a single transaction

pub mod buku;
pub mod commands;
pub mod diigo;
pub mod error;
pub mod progress;
pub mod reconcile;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::Parser;
use commands::import::ImportOptions;
use std::path::PathBuf;

/// bukport - Import Diigo bookmarks into buku
#[derive(Parser, Debug)]
#[command(name = "bukport")]
#[command(author, version, about = "Import Diigo bookmarks into buku", long_about = None)]
pub struct Cli {
    /// Your Diigo application key
    pub key: String,

    /// Your Diigo username
    pub username: String,

    /// Path to the buku database (defaults to the standard buku location)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Bookmarks to request per page (capped at the Diigo maximum of 100)
    #[arg(long)]
    pub count: Option<u32>,

    /// Stop fetching once the pagination offset reaches this many rows
    #[arg(long)]
    pub limit: Option<u64>,

    /// Diigo API base URL
    #[arg(
        long,
        env = "BUKPORT_API_URL",
        default_value = "https://secure.diigo.com"
    )]
    pub api_url: String,

    /// Report what would be added without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Convert parsed arguments into options for the import command
    pub fn into_options(self) -> ImportOptions {
        ImportOptions {
            api_url: self.api_url,
            key: self.key,
            username: self.username,
            db_path: self.db,
            count: self.count,
            limit: self.limit,
            dry_run: self.dry_run,
        }
    }
}
