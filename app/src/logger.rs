use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

/// Log file used when the configuration names none
pub const DEFAULT_LOG_FILE: &str = "bigboard.log";

pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info, // Default to Info for any other value
    }
}

/// Installs the global logger writing to the configured (or default) file.
///
/// Terminal output is reserved for connection labels and page changes, so
/// log records only ever go to the file. When the file cannot be opened the
/// dispatcher is installed without any output.
pub fn setup_logger(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level_filter(config.level()))
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn);

    let file_path = config.file().unwrap_or(DEFAULT_LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(file_path) {
        Ok(file) => {
            base_config.chain(file).apply()?;
        }
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{file_path}': {e}");
            eprintln!("Continuing without file logging.");
            base_config.apply()?;
        }
    }

    log::info!("Logger initialized with level: {}", config.level());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_filter_is_case_insensitive() {
        assert_eq!(level_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_filter("warn"), LevelFilter::Warn);
        assert_eq!(level_filter("verbose"), LevelFilter::Info);
    }
}
