//! bukport - Main entry point

use bukport_cli::Cli;
use bukport_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbose flag and environment
    let log_config = if cli.verbose {
        // Verbose mode: log to console with debug level
        LogConfig::builder()
            .level(LogLevel::Debug)
            .output(LogOutput::Console)
            .log_file_prefix("bukport".to_string())
            .build()
    } else {
        // Normal mode: the fetch log goes to a file, console stays clean
        LogConfig::builder()
            .level(LogLevel::Info)
            .output(LogOutput::File)
            .log_file_prefix("bukport".to_string())
            .build()
    };

    // Environment variables take precedence when set
    let log_config = log_config.with_env_overrides().unwrap_or_default();

    // Initialize logging (the import should still work without it)
    let _ = init_logging(&log_config);

    // Execute the import
    if let Err(e) = bukport_cli::commands::import::run(cli.into_options()).await {
        error!(error = %e, "Import failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
