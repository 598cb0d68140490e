//! Remote movie catalog integration.
//!
//! This module is the network boundary: title search against the
//! catalog's search endpoint and raw poster retrieval against its
//! image endpoint, both behind a retry policy for transient failures.

mod tmdb;
mod types;

pub use tmdb::{TmdbClient, TmdbConfig};
pub use types::{CatalogMatch, RetryConfig};

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when interacting with the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded its timeout.
    #[error("Request timed out")]
    Timeout,

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl CatalogError {
    /// Whether the resilience policy should retry after this error.
    ///
    /// Transport failures, timeouts, 429 and the transient 5xx family
    /// are retryable; everything else fails the attempt immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            CatalogError::Timeout => true,
            CatalogError::RateLimited => true,
            CatalogError::Status { status, .. } => {
                matches!(status, 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// Trait for movie catalog clients.
///
/// Implemented by [`TmdbClient`] and by the test double in
/// `crate::testing`, so the batch pipeline never depends on a concrete
/// backend.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search for a movie by title and 4-digit year string.
    ///
    /// Returns the first result by the service's relevance ranking, or
    /// `None` when the result list is empty.
    async fn search_movie(
        &self,
        title: &str,
        year: &str,
    ) -> Result<Option<CatalogMatch>, CatalogError>;

    /// Fetch raw poster bytes for a poster path returned by a search.
    async fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>, CatalogError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses_are_retryable() {
        for status in [500, 502, 503, 504] {
            let err = CatalogError::Status {
                status,
                message: String::new(),
            };
            assert!(err.is_retryable(), "status {} should be retryable", status);
        }
        assert!(CatalogError::RateLimited.is_retryable());
        assert!(CatalogError::Timeout.is_retryable());
    }

    #[test]
    fn test_permanent_failures_are_not_retryable() {
        for status in [400, 401, 403, 404, 501] {
            let err = CatalogError::Status {
                status,
                message: String::new(),
            };
            assert!(!err.is_retryable(), "status {} should not retry", status);
        }
        assert!(!CatalogError::Parse("bad json".to_string()).is_retryable());
        assert!(!CatalogError::NotConfigured("no key".to_string()).is_retryable());
    }
}
