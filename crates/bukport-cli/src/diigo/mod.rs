//! Diigo API client
//!
//! Wire types, endpoint builders, and the paginated bookmark fetcher.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{DiigoClient, FetchOptions};
pub use types::{DiigoAnnotation, DiigoBookmark, DiigoComment};
