//! TMDB (The Movie Database) API client.
//!
//! TMDB requires an API key for access.
//! Rate limits are generous (around 40 requests per second), but 429
//! and transient 5xx responses are still retried with backoff.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{CatalogMatch, RetryConfig};
use super::{CatalogError, MovieCatalog};

/// TMDB API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API key (required).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://api.themoviedb.org/3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image base URL for posters (default: https://image.tmdb.org/t/p/w500).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Connection pool size. Must be at least the worker concurrency
    /// limit so parallel workers never contend for connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Retry policy for transient failures.
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            image_base_url: None,
            timeout_secs: default_timeout(),
            pool_size: default_pool_size(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_pool_size() -> usize {
    20
}

/// TMDB API client.
///
/// One pooled HTTP client lives for the process lifetime; the
/// instance is explicitly constructed and injected into the batch, no
/// ambient global session.
pub struct TmdbClient {
    client: Client,
    base_url: String,
    image_base_url: String,
    api_key: String,
    retry: RetryConfig,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Result<Self, CatalogError> {
        if config.api_key.is_empty() {
            return Err(CatalogError::NotConfigured(
                "TMDB API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.pool_size)
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| "https://api.themoviedb.org/3".to_string());

        let image_base_url = config
            .image_base_url
            .unwrap_or_else(|| "https://image.tmdb.org/t/p/w500".to_string());

        Ok(Self {
            client,
            base_url,
            image_base_url,
            api_key: config.api_key,
            retry: config.retry,
        })
    }

    /// Run one request closure under the retry policy.
    ///
    /// Retries only errors classified retryable by
    /// [`CatalogError::is_retryable`], up to `max_attempts` total
    /// attempts with exponential backoff.
    async fn with_retry<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, CatalogError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, CatalogError>>,
    {
        let max_delay = Duration::from_millis(self.retry.max_delay_ms);
        let mut delay = Duration::from_millis(self.retry.initial_delay_ms);
        let mut attempt = 1u32;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.retry.max_attempts => {
                    warn!(
                        "TMDB {} attempt {}/{} failed ({}), retrying in {:?}",
                        operation, attempt, self.retry.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.mul_f64(self.retry.backoff_multiplier).min(max_delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Classify a non-success response status.
    async fn status_error(response: reqwest::Response) -> CatalogError {
        let status = response.status();
        if status == 401 {
            return CatalogError::NotConfigured("Invalid TMDB API key".to_string());
        }
        if status == 429 {
            return CatalogError::RateLimited;
        }
        let body = response.text().await.unwrap_or_default();
        CatalogError::Status {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        }
    }

    fn transport_error(e: reqwest::Error) -> CatalogError {
        if e.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::Http(e)
        }
    }

    async fn search_movie_once(
        &self,
        title: &str,
        year: &str,
    ) -> Result<Option<CatalogMatch>, CatalogError> {
        let url = format!("{}/search/movie", self.base_url);

        debug!("TMDB movie search: query='{}', year={}", title, year);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("year", year),
            ])
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let search_result: TmdbSearchResponse = response.json().await.map_err(|e| {
            CatalogError::Parse(format!("Failed to parse movie search response: {}", e))
        })?;

        Ok(search_result.results.into_iter().next().map(Into::into))
    }

    async fn fetch_poster_once(&self, poster_path: &str) -> Result<Vec<u8>, CatalogError> {
        let url = format!("{}{}", self.image_base_url, poster_path);

        debug!("TMDB poster fetch: {}", poster_path);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let bytes = response.bytes().await.map_err(Self::transport_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movie(
        &self,
        title: &str,
        year: &str,
    ) -> Result<Option<CatalogMatch>, CatalogError> {
        self.with_retry("movie search", || self.search_movie_once(title, year))
            .await
    }

    async fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>, CatalogError> {
        self.with_retry("poster fetch", || self.fetch_poster_once(poster_path))
            .await
    }
}

// ============================================================================
// TMDB API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse {
    #[serde(default)]
    results: Vec<TmdbMovieResult>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieResult {
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
}

impl From<TmdbMovieResult> for CatalogMatch {
    fn from(r: TmdbMovieResult) -> Self {
        Self {
            title: r.title,
            release_date: r.release_date,
            poster_path: r.poster_path,
        }
    }
}
