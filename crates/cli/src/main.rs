use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use posterfetch_core::{
    discover_inputs, load_config, run_batch, validate_config, BatchError, MovieCatalog, TmdbClient,
};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Movie Poster Fetcher v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("POSTERFETCH_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let mut config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!(
        "Configuration loaded: {}",
        serde_json::to_string(&config.sanitized()).unwrap_or_default()
    );

    // The pool must cover every concurrent worker, so parallel
    // requests never queue on connection acquisition.
    if config.tmdb.pool_size < config.batch.max_workers {
        config.tmdb.pool_size = config.batch.max_workers;
    }

    let catalog: Arc<dyn MovieCatalog> = Arc::new(
        TmdbClient::new(config.tmdb.clone()).context("Failed to create TMDB client")?,
    );

    let items = match discover_inputs(&config.library.torrent_dir) {
        Ok(items) => items,
        Err(e @ (BatchError::DirectoryNotFound(_) | BatchError::NoInputFiles(_))) => {
            // Nothing to do is a clean termination, not a failure.
            println!("{}", e);
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to scan torrent directory"),
    };

    let report = run_batch(catalog, items, config.batch.max_workers).await;
    println!("{}", report.render());
    info!("Done");

    Ok(())
}
