//! Batch orchestration: input discovery, bounded parallel dispatch,
//! and report aggregation.

mod report;
mod runner;

pub use report::BatchReport;
pub use runner::{discover_inputs, run_batch, DEFAULT_MAX_WORKERS};

use std::path::PathBuf;
use thiserror::Error;

/// Pre-batch failures. These terminate the batch before any item is
/// dispatched; they are reported, never raised as panics.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Target directory does not exist.
    #[error("Folder not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Target directory contains no matching input files.
    #[error("No .torrent files found in {0}")]
    NoInputFiles(PathBuf),

    /// Directory listing failed.
    #[error("Failed to read directory: {0}")]
    Io(#[from] std::io::Error),
}
