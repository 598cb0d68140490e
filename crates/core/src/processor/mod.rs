//! Per-item processing: one input file in, exactly one outcome out.
//!
//! No failure escapes this boundary. Every error path, from an
//! unparseable filename to a failed artifact write, is converted into
//! an [`Outcome`] value for the aggregation layer to report.

mod types;

pub use types::{InputItem, Outcome, OutcomeStatus};

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::catalog::MovieCatalog;
use crate::extractor::extract_movie_query;

/// Process one input item to its terminal outcome.
///
/// The artifact-existence check runs before any network call, so
/// already-satisfied items cost no bandwidth on repeat runs.
pub async fn process_item(catalog: &dyn MovieCatalog, item: &InputItem) -> Outcome {
    let Some(query) = extract_movie_query(&item.filename) else {
        return Outcome::new(
            &item.filename,
            OutcomeStatus::ParseFailed,
            "could not parse title/year from filename",
        );
    };

    debug!(
        "Detected '{}' ({}) from {}",
        query.title, query.year, item.filename
    );

    let artifact = item.artifact_path();
    if artifact.exists() {
        return Outcome::new(
            &item.filename,
            OutcomeStatus::AlreadyExists,
            format!("poster already exists: {}", artifact.display()),
        );
    }

    let matched = match catalog.search_movie(&query.title, &query.year).await {
        Ok(Some(m)) => m,
        Ok(None) => {
            return Outcome::new(
                &item.filename,
                OutcomeStatus::NotFound,
                format!("no catalog match for '{}' ({})", query.title, query.year),
            );
        }
        Err(e) => {
            return Outcome::new(
                &item.filename,
                OutcomeStatus::NotFound,
                format!("catalog search failed: {}", e),
            );
        }
    };

    let Some(poster_path) = matched.poster_path.as_deref() else {
        return Outcome::new(
            &item.filename,
            OutcomeStatus::DownloadFailed,
            format!("catalog match '{}' has no poster", matched.title),
        );
    };

    let bytes = match catalog.fetch_poster(poster_path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Outcome::new(
                &item.filename,
                OutcomeStatus::DownloadFailed,
                format!("poster fetch failed: {}", e),
            );
        }
    };

    match write_artifact(&artifact, &bytes).await {
        Ok(()) => Outcome::new(
            &item.filename,
            OutcomeStatus::Downloaded,
            format!("poster saved: {}", artifact.display()),
        ),
        Err(e) => Outcome::new(
            &item.filename,
            OutcomeStatus::DownloadFailed,
            format!("poster write failed: {}", e),
        ),
    }
}

/// Write poster bytes atomically: stage into a temp file next to the
/// target, then rename. A failed write removes the temp file so no
/// truncated artifact can be mistaken for success on a later run.
async fn write_artifact(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".part");
    let tmp = std::path::PathBuf::from(tmp);

    let result = async {
        let mut file = fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);
        fs::rename(&tmp, path).await
    }
    .await;

    if result.is_err() {
        let _ = fs::remove_file(&tmp).await;
    }

    result
}
