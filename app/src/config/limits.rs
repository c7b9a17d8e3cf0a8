/// Shortest accepted HTTP request timeout
pub const MIN_HTTP_TIMEOUT_SECS: u64 = 1;

/// Longest accepted HTTP request timeout (5 minutes)
pub const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

/// Longest accepted delay before the in-process channel reports a connection
pub const MAX_CONNECT_DELAY_MS: u64 = 60_000;

/// Log levels understood by the logger
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
