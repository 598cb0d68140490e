use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration, merging (lowest to highest precedence):
/// defaults, the TOML file at `path` if it exists, and
/// `POSTERFETCH_`-prefixed environment variables.
///
/// A missing file is not an error; every field has a default and the
/// API key can arrive via `POSTERFETCH_TMDB__API_KEY`. Nested fields
/// use a double underscore as separator so field names containing
/// underscores stay addressable.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed("POSTERFETCH_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
