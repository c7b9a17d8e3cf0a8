use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub mod app;
pub mod limits;
pub mod validation;

pub use app::{AppConfig, ChannelConfig, HttpConfig};
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `BIGBOARD__HTTP__BASE_URL`
pub const ENV_PREFIX: &str = "BIGBOARD";

/// Global configuration loading and access
static CONFIG: std::sync::OnceLock<ConfigLoadResult> = std::sync::OnceLock::new();

/// Loads configuration from `path` (or `config.toml`) and the environment,
/// bypassing the global cache.
///
/// The file is optional; every value has a default. Environment entries
/// override file values.
pub fn load_config_from(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let file_source = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };
    let env_source = Environment::with_prefix(ENV_PREFIX).separator("__");

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Loads the global configuration on first call; later calls return the
/// cached result and ignore `path`.
pub fn init_config(path: Option<&Path>) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config_from(path))
}

/// Additional logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
