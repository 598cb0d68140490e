use super::{types::Config, ConfigError};

/// Validate configuration before any work starts.
///
/// Checks:
/// - TMDB API key is set and is not the placeholder value
/// - Torrent directory is set and is not the placeholder value
/// - Worker concurrency and request timeout are non-zero
///
/// Messages carry remediation hints so a fresh install can be fixed
/// without reading source code.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.tmdb.api_key.is_empty() || config.tmdb.api_key == "your_api_key_here" {
        return Err(ConfigError::ValidationError(
            "TMDB API key is not set. Set tmdb.api_key in the config file or \
             POSTERFETCH_TMDB__API_KEY in the environment. \
             Get a free API key at: https://www.themoviedb.org/settings/api"
                .to_string(),
        ));
    }

    let torrent_dir = config.library.torrent_dir.as_os_str();
    if torrent_dir.is_empty() || torrent_dir == "/path/to/your/torrents" {
        return Err(ConfigError::ValidationError(
            "Torrent directory is not set. Set library.torrent_dir in the config \
             file or POSTERFETCH_LIBRARY__TORRENT_DIR in the environment"
                .to_string(),
        ));
    }

    if config.batch.max_workers == 0 {
        return Err(ConfigError::ValidationError(
            "batch.max_workers cannot be 0".to_string(),
        ));
    }

    if config.tmdb.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tmdb.timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.tmdb.api_key = "real-key".to_string();
        config.library.torrent_dir = PathBuf::from("/media/torrents");
        config
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_missing_api_key() {
        let mut config = valid_config();
        config.tmdb.api_key = String::new();

        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("themoviedb.org"));
    }

    #[test]
    fn test_validate_placeholder_api_key() {
        let mut config = valid_config();
        config.tmdb.api_key = "your_api_key_here".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_placeholder_torrent_dir() {
        let mut config = valid_config();
        config.library.torrent_dir = PathBuf::from("/path/to/your/torrents");

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("torrent_dir"));
    }

    #[test]
    fn test_validate_zero_workers_fails() {
        let mut config = valid_config();
        config.batch.max_workers = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_timeout_fails() {
        let mut config = valid_config();
        config.tmdb.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
