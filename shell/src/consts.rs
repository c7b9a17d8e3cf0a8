/// Language code the application ships translations for and falls back to.
pub const LANG_EN: &str = "en";

/// Scheme prefix of the `Authorization` header value attached to requests.
pub const AUTH_SCHEME: &str = "Basic";

/// Capacity of the in-process channel's broadcast buffers.
pub const CHANNEL_EVENT_CAPACITY: usize = 256;

/// Number of long-lived background subscriptions hosted by the shell.
pub const SHELL_BACKGROUND_TASKS: usize = 2;
