pub mod catalog;
pub mod config;
pub mod extractor;
pub mod orchestrator;
pub mod processor;
pub mod testing;

pub use catalog::{CatalogError, CatalogMatch, MovieCatalog, RetryConfig, TmdbClient, TmdbConfig};
pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use extractor::{extract_movie_query, ParsedQuery};
pub use orchestrator::{
    discover_inputs, run_batch, BatchError, BatchReport, DEFAULT_MAX_WORKERS,
};
pub use processor::{process_item, InputItem, Outcome, OutcomeStatus};
