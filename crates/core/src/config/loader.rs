use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable prefix, e.g. `SETLIST2TUBE_YOUTUBE__ACCESS_TOKEN`.
pub const ENV_PREFIX: &str = "SETLIST2TUBE_";

/// Load configuration from file with environment variable overrides.
///
/// A missing file is not an error: defaults plus environment are used.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!("Config file {:?} not found, using defaults", path);
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
