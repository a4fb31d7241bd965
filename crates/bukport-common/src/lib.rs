//! bukport Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and logging for the bukport workspace.
//!
//! # Overview
//!
//! This crate provides the functionality shared between workspace members:
//!
//! - **Model**: the normalized bookmark record both sources are converted to
//! - **Logging**: tracing setup with console and file outputs

pub mod logging;
pub mod model;

// Re-export commonly used types
pub use model::Bookmark;
