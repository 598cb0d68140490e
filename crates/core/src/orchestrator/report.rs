//! Aggregated end-of-run report.

use std::fmt::Write as _;

use serde::Serialize;

use crate::processor::{Outcome, OutcomeStatus};

/// Aggregated result of one batch run: counts per status plus every
/// outcome, in completion order.
///
/// Built incrementally by a single aggregator as outcomes arrive;
/// outcomes are appended, never mutated. `Serialize` so automation can
/// consume the report programmatically.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    total: usize,
    downloaded: usize,
    already_exists: usize,
    parse_failed: usize,
    not_found: usize,
    download_failed: usize,
    outcomes: Vec<Outcome>,
}

impl BatchReport {
    /// Create an empty report for a batch of `total` items.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            downloaded: 0,
            already_exists: 0,
            parse_failed: 0,
            not_found: 0,
            download_failed: 0,
            outcomes: Vec::with_capacity(total),
        }
    }

    /// Record one completed outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome.status {
            OutcomeStatus::Downloaded => self.downloaded += 1,
            OutcomeStatus::AlreadyExists => self.already_exists += 1,
            OutcomeStatus::ParseFailed => self.parse_failed += 1,
            OutcomeStatus::NotFound => self.not_found += 1,
            OutcomeStatus::DownloadFailed => self.download_failed += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Number of items the batch started with.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count of outcomes with the given status.
    pub fn count(&self, status: OutcomeStatus) -> usize {
        match status {
            OutcomeStatus::Downloaded => self.downloaded,
            OutcomeStatus::AlreadyExists => self.already_exists,
            OutcomeStatus::ParseFailed => self.parse_failed,
            OutcomeStatus::NotFound => self.not_found,
            OutcomeStatus::DownloadFailed => self.download_failed,
        }
    }

    /// All recorded outcomes, in completion order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// True once every item has an outcome.
    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.total
    }

    /// Outcomes with the given status, sorted by filename for
    /// deterministic, diffable output.
    pub fn outcomes_with_status(&self, status: OutcomeStatus) -> Vec<&Outcome> {
        let mut selected: Vec<&Outcome> = self
            .outcomes
            .iter()
            .filter(|o| o.status == status)
            .collect();
        selected.sort_by(|a, b| a.filename.cmp(&b.filename));
        selected
    }

    /// Render the human-readable summary: counts per status, then the
    /// downloaded filenames and the failed filenames with reasons.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(out, "Summary:");
        for status in [
            OutcomeStatus::Downloaded,
            OutcomeStatus::AlreadyExists,
            OutcomeStatus::ParseFailed,
            OutcomeStatus::NotFound,
            OutcomeStatus::DownloadFailed,
        ] {
            let _ = writeln!(out, "  {:<24} {}", status.label(), self.count(status));
        }
        let _ = writeln!(out, "  {:<24} {}", "Total", self.total);

        let downloaded = self.outcomes_with_status(OutcomeStatus::Downloaded);
        if !downloaded.is_empty() {
            let _ = writeln!(out, "\nDownloaded:");
            for outcome in downloaded {
                let _ = writeln!(out, "  {}", outcome.filename);
            }
        }

        let failed = self.outcomes_with_status(OutcomeStatus::DownloadFailed);
        if !failed.is_empty() {
            let _ = writeln!(out, "\nDownload failed:");
            for outcome in failed {
                let _ = writeln!(out, "  {} - {}", outcome.filename, outcome.detail);
            }
        }

        out
    }
}
