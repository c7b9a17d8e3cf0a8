use super::{LoggingConfig, limits::*, validation::ConfigValidationError};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    settings_path: Option<String>,

    #[serde(default)]
    http: HttpConfig,
    #[serde(default)]
    channel: ChannelConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let timeout = self.http.timeout_secs();
        if !(MIN_HTTP_TIMEOUT_SECS..=MAX_HTTP_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::HttpTimeout {
                configured: timeout,
                min_limit: MIN_HTTP_TIMEOUT_SECS,
                max_limit: MAX_HTTP_TIMEOUT_SECS,
            });
        }

        if let Some(base_url) = self.http.base_url() {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                errors.push(ConfigValidationError::BaseUrl {
                    configured: base_url.to_string(),
                });
            }
        }

        if self.channel.connect_delay_ms() > MAX_CONNECT_DELAY_MS {
            errors.push(ConfigValidationError::ConnectDelay {
                configured: self.channel.connect_delay_ms(),
                limit: MAX_CONNECT_DELAY_MS,
            });
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if self
            .settings_path
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            errors.push(ConfigValidationError::SettingsPath);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Location of the persisted user settings.
    ///
    /// Defaults to `bigboard/settings.json` under the platform config
    /// directory, or the working directory when there is none.
    pub fn settings_path(&self) -> PathBuf {
        match &self.settings_path {
            Some(path) => PathBuf::from(path),
            None => dirs::config_dir()
                .map(|dir| dir.join("bigboard"))
                .unwrap_or_default()
                .join("settings.json"),
        }
    }

    pub fn http(&self) -> &HttpConfig {
        &self.http
    }

    pub fn channel(&self) -> &ChannelConfig {
        &self.channel
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

/// Outgoing HTTP configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct HttpConfig {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs())
    }
}

/// Real-time channel configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ChannelConfig {
    connect_delay_ms: Option<u64>,
}

impl ChannelConfig {
    pub fn connect_delay_ms(&self) -> u64 {
        self.connect_delay_ms.unwrap_or(250)
    }

    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms())
    }
}
