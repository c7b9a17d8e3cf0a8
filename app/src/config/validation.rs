use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid http.timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    HttpTimeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid http.base_url: {configured}")]
    BaseUrl { configured: String },
    #[error("Invalid channel.connect_delay_ms: {configured} (limit: {limit})")]
    ConnectDelay { configured: u64, limit: u64 },
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
    #[error("Invalid settings_path: path is empty")]
    SettingsPath,
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::HttpTimeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "HTTP timeout out of range!\n\n\
                    Your configured value: {configured}\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update http.timeout_secs in config.toml."
                )
            }
            ConfigValidationError::BaseUrl { configured } => {
                format!(
                    "HTTP base URL is not usable!\n\n\
                    Your configured value: {configured}\n\n\
                    The URL must start with http:// or https://. \
                    Please update http.base_url in config.toml."
                )
            }
            ConfigValidationError::ConnectDelay { configured, limit } => {
                format!(
                    "Channel connect delay too high!\n\n\
                    Your configured value: {configured}\n\
                    Maximum: {limit} milliseconds\n\n\
                    Please update channel.connect_delay_ms in config.toml."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level!\n\n\
                    Your configured value: {configured}\n\
                    Valid values: trace, debug, info, warn, error\n\n\
                    Please update logging.level in config.toml."
                )
            }
            ConfigValidationError::SettingsPath => "Settings path is empty!\n\n\
                Remove settings_path from config.toml to use the default location."
                .to_string(),
        }
    }
}

/// Outcome of loading the configuration
#[derive(Debug, Clone)]
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}
