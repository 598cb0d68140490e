//! Testing utilities and mock implementations.
//!
//! Provides a mock implementation of the [`MovieCatalog`] trait so the
//! processor and orchestrator can be exercised end to end without real
//! network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use posterfetch_core::testing::MockMovieCatalog;
//!
//! let catalog = MockMovieCatalog::new();
//! catalog
//!     .add_movie_with_poster("Inception", "2010-07-15", "/inception.jpg", b"jpeg")
//!     .await;
//!
//! let matched = catalog.search_movie("Inception", "2010").await?;
//! assert!(matched.is_some());
//! ```
//!
//! [`MovieCatalog`]: crate::catalog::MovieCatalog

mod mock_catalog;

pub use mock_catalog::{MockMovieCatalog, RecordedQuery};
