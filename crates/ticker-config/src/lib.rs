//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, FetchSettings, LoggingConfig, PolicySettings, StorageSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Environment variable prefix, e.g. `TICKERWATCH__STORAGE__DIR`.
pub const ENV_PREFIX: &str = "TICKERWATCH";

/// Load configuration from file and environment.
///
/// A missing file is not an error; every section falls back to its
/// defaults and environment variables still apply.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
