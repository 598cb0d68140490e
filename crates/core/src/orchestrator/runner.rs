//! Batch runner: discovers inputs and drives them through a bounded
//! worker pool.
//!
//! Workers send finished outcomes over a channel to a single
//! aggregation point that owns the report, so no counters are shared
//! between workers. Completion order is unconstrained.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tracing::{debug, info, warn};

use crate::catalog::MovieCatalog;
use crate::processor::{process_item, InputItem, OutcomeStatus};

use super::report::BatchReport;
use super::BatchError;

/// Default worker pool size.
pub const DEFAULT_MAX_WORKERS: usize = 10;

/// Enumerate `*.torrent` files in the target directory, non-recursive.
///
/// Items are sorted by filename so dispatch order is deterministic.
/// A missing directory or an empty listing is a clean pre-batch
/// termination, not a crash.
pub fn discover_inputs(dir: &Path) -> Result<Vec<InputItem>, BatchError> {
    if !dir.is_dir() {
        return Err(BatchError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut items = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_torrent = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("torrent"));
        if !is_torrent {
            continue;
        }
        if let Some(item) = InputItem::from_path(&path) {
            items.push(item);
        }
    }

    if items.is_empty() {
        return Err(BatchError::NoInputFiles(dir.to_path_buf()));
    }

    items.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(items)
}

/// Run the batch: one worker invocation per item, at most
/// `max_workers` in flight, every item isolated from its neighbours'
/// failures.
///
/// Returns the finalized report once every item has its outcome.
pub async fn run_batch(
    catalog: Arc<dyn MovieCatalog>,
    items: Vec<InputItem>,
    max_workers: usize,
) -> BatchReport {
    let total = items.len();
    info!(
        "Processing {} torrent files with {} workers",
        total,
        max_workers.min(total.max(1))
    );

    let semaphore = Arc::new(Semaphore::new(max_workers.max(1)));
    let (outcome_tx, mut outcome_rx) = mpsc::channel(max_workers.max(1));

    for item in items {
        let semaphore = Arc::clone(&semaphore);
        let catalog = Arc::clone(&catalog);
        let outcome_tx = outcome_tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                // The semaphore is never closed while the batch runs.
                return;
            };
            let outcome = process_item(catalog.as_ref(), &item).await;
            if outcome_tx.send(outcome).await.is_err() {
                warn!("Outcome receiver dropped before batch completion");
            }
        });
    }
    // Workers hold the remaining senders; the channel closes when the
    // last one finishes.
    drop(outcome_tx);

    // Single-consumer aggregation: this task owns all report mutation.
    let mut report = BatchReport::new(total);
    while let Some(outcome) = outcome_rx.recv().await {
        match outcome.status {
            OutcomeStatus::Downloaded | OutcomeStatus::AlreadyExists => {
                debug!("{}: {}", outcome.filename, outcome.detail);
            }
            _ => {
                info!("{}: {}", outcome.filename, outcome.detail);
            }
        }
        report.record(outcome);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_missing_directory() {
        let result = discover_inputs(Path::new("/nonexistent/torrents"));
        assert!(matches!(result, Err(BatchError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = TempDir::new().unwrap();
        let result = discover_inputs(dir.path());
        assert!(matches!(result, Err(BatchError::NoInputFiles(_))));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.torrent"), b"x").unwrap();
        std::fs::write(dir.path().join("a.torrent"), b"x").unwrap();
        std::fs::write(dir.path().join("poster.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let items = discover_inputs(dir.path()).unwrap();
        let names: Vec<_> = items.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a.torrent", "b.torrent"]);
    }

    #[test]
    fn test_discover_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("top.torrent"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.torrent"), b"x").unwrap();

        let items = discover_inputs(dir.path()).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].filename, "top.torrent");
    }

    #[test]
    fn test_discover_extension_case_insensitive() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Movie (2001).TORRENT"), b"x").unwrap();

        let items = discover_inputs(dir.path()).unwrap();
        assert_eq!(items.len(), 1);
    }
}
