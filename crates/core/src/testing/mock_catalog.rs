//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogError, CatalogMatch, MovieCatalog};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedQuery {
    SearchMovie { title: String, year: String },
    FetchPoster { poster_path: String },
}

/// Mock implementation of the [`MovieCatalog`] trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable movie matches and poster bytes
/// - Track queries for assertions
/// - Simulate failures and slow responses
#[derive(Debug, Clone)]
pub struct MockMovieCatalog {
    /// Registered movies, matched by title substring plus release year.
    movies: Arc<RwLock<Vec<CatalogMatch>>>,
    /// Poster bytes by poster path.
    posters: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    /// Recorded queries, in call order.
    queries: Arc<RwLock<Vec<RecordedQuery>>>,
    /// If set, the next search fails with this error.
    next_search_error: Arc<RwLock<Option<CatalogError>>>,
    /// Artificial delay applied to every search.
    search_delay: Arc<RwLock<Option<Duration>>>,
    /// Currently in-flight searches.
    in_flight: Arc<RwLock<usize>>,
    /// Highest in-flight count observed.
    peak_in_flight: Arc<RwLock<usize>>,
}

impl Default for MockMovieCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMovieCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self {
            movies: Arc::new(RwLock::new(Vec::new())),
            posters: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
            next_search_error: Arc::new(RwLock::new(None)),
            search_delay: Arc::new(RwLock::new(None)),
            in_flight: Arc::new(RwLock::new(0)),
            peak_in_flight: Arc::new(RwLock::new(0)),
        }
    }

    /// Register a movie without poster bytes.
    pub async fn add_movie(&self, title: &str, release_date: &str, poster_path: Option<&str>) {
        self.movies.write().await.push(CatalogMatch {
            title: title.to_string(),
            release_date: Some(release_date.to_string()),
            poster_path: poster_path.map(|p| p.to_string()),
        });
    }

    /// Register a movie together with its poster bytes, so a full
    /// search-then-fetch sequence succeeds.
    pub async fn add_movie_with_poster(
        &self,
        title: &str,
        release_date: &str,
        poster_path: &str,
        bytes: &[u8],
    ) {
        self.add_movie(title, release_date, Some(poster_path)).await;
        self.posters
            .write()
            .await
            .insert(poster_path.to_string(), bytes.to_vec());
    }

    /// Make the next search fail with the given error.
    pub async fn set_next_search_error(&self, error: CatalogError) {
        *self.next_search_error.write().await = Some(error);
    }

    /// Delay every search by `delay`, to widen the window in which
    /// concurrent calls overlap.
    pub async fn set_search_delay(&self, delay: Duration) {
        *self.search_delay.write().await = Some(delay);
    }

    /// All queries recorded so far, in call order.
    pub async fn recorded_queries(&self) -> Vec<RecordedQuery> {
        self.queries.read().await.clone()
    }

    /// Total number of queries (searches and fetches) recorded.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Highest number of simultaneously in-flight searches observed.
    pub async fn peak_in_flight(&self) -> usize {
        *self.peak_in_flight.read().await
    }

    async fn enter_search(&self) {
        let mut in_flight = self.in_flight.write().await;
        *in_flight += 1;
        let mut peak = self.peak_in_flight.write().await;
        if *in_flight > *peak {
            *peak = *in_flight;
        }
    }

    async fn exit_search(&self) {
        *self.in_flight.write().await -= 1;
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    async fn search_movie(
        &self,
        title: &str,
        year: &str,
    ) -> Result<Option<CatalogMatch>, CatalogError> {
        self.queries.write().await.push(RecordedQuery::SearchMovie {
            title: title.to_string(),
            year: year.to_string(),
        });

        if let Some(error) = self.next_search_error.write().await.take() {
            return Err(error);
        }

        self.enter_search().await;
        let delay = *self.search_delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.exit_search().await;

        let title_lower = title.to_lowercase();
        let matched = self
            .movies
            .read()
            .await
            .iter()
            .find(|m| {
                m.title.to_lowercase().contains(&title_lower)
                    && m.year().map(|y| y.to_string()).as_deref() == Some(year)
            })
            .cloned();
        Ok(matched)
    }

    async fn fetch_poster(&self, poster_path: &str) -> Result<Vec<u8>, CatalogError> {
        self.queries.write().await.push(RecordedQuery::FetchPoster {
            poster_path: poster_path.to_string(),
        });

        match self.posters.read().await.get(poster_path) {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(CatalogError::Status {
                status: 404,
                message: format!("no poster registered at {}", poster_path),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_matches_title_and_year() {
        let catalog = MockMovieCatalog::new();
        catalog.add_movie("Inception", "2010-07-15", None).await;

        let matched = catalog.search_movie("inception", "2010").await.unwrap();
        assert!(matched.is_some());

        let wrong_year = catalog.search_movie("inception", "2011").await.unwrap();
        assert!(wrong_year.is_none());
    }

    #[tokio::test]
    async fn test_queries_are_recorded_in_order() {
        let catalog = MockMovieCatalog::new();
        catalog
            .add_movie_with_poster("Heat", "1995-12-15", "/heat.jpg", b"jpeg")
            .await;

        let matched = catalog.search_movie("Heat", "1995").await.unwrap().unwrap();
        let bytes = catalog
            .fetch_poster(matched.poster_path.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(bytes, b"jpeg");

        let queries = catalog.recorded_queries().await;
        assert_eq!(
            queries,
            vec![
                RecordedQuery::SearchMovie {
                    title: "Heat".to_string(),
                    year: "1995".to_string(),
                },
                RecordedQuery::FetchPoster {
                    poster_path: "/heat.jpg".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_injected_error_fires_once() {
        let catalog = MockMovieCatalog::new();
        catalog.add_movie("Heat", "1995-12-15", None).await;
        catalog
            .set_next_search_error(CatalogError::Timeout)
            .await;

        assert!(catalog.search_movie("Heat", "1995").await.is_err());
        assert!(catalog.search_movie("Heat", "1995").await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_poster_is_an_error() {
        let catalog = MockMovieCatalog::new();
        let result = catalog.fetch_poster("/missing.jpg").await;
        assert!(matches!(
            result,
            Err(CatalogError::Status { status: 404, .. })
        ));
    }
}
