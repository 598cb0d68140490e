//! Types for per-item processing.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One source file discovered at batch start. Immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputItem {
    /// Full filename, e.g. `Inception (2010).torrent`.
    pub filename: String,
    /// Filename without the extension.
    pub stem: String,
    /// Absolute or batch-relative path to the file.
    pub path: PathBuf,
}

impl InputItem {
    /// Build an item from a path. Returns `None` when the path has no
    /// usable filename.
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?.to_string();
        Some(Self {
            filename,
            stem,
            path: path.to_path_buf(),
        })
    }

    /// Path of the poster artifact for this item: `<stem>.jpg` in the
    /// same directory as the input file.
    pub fn artifact_path(&self) -> PathBuf {
        self.path.with_file_name(format!("{}.jpg", self.stem))
    }
}

/// Terminal classification for one processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Poster fetched and written.
    Downloaded,
    /// Artifact already present, no network calls made.
    AlreadyExists,
    /// Filename did not yield a usable title/year.
    ParseFailed,
    /// Catalog search returned no match (or failed permanently).
    NotFound,
    /// Poster fetch or artifact write failed.
    DownloadFailed,
}

impl OutcomeStatus {
    /// Human-readable label used in report output.
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeStatus::Downloaded => "Downloaded",
            OutcomeStatus::AlreadyExists => "Already exists",
            OutcomeStatus::ParseFailed => "Parse failed",
            OutcomeStatus::NotFound => "Not found",
            OutcomeStatus::DownloadFailed => "Download failed",
        }
    }
}

/// Result record for one input item. Produced exactly once per item,
/// immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Filename of the input item.
    pub filename: String,
    /// Terminal status.
    pub status: OutcomeStatus,
    /// Human-readable reason or description.
    pub detail: String,
}

impl Outcome {
    pub fn new(item_filename: &str, status: OutcomeStatus, detail: impl Into<String>) -> Self {
        Self {
            filename: item_filename.to_string(),
            status,
            detail: detail.into(),
        }
    }
}
