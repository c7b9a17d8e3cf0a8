use shell::http::HttpError;
use shell::settings::SettingsError;
use shell::startup::StartupError;
use std::fmt::Display;
use tokio::sync::mpsc::UnboundedSender;

/// Application-wide error types for the BigBoard terminal host.
///
/// Library errors from the shell are flattened into string-carrying
/// variants so errors can be cloned into reports and compared in tests.
///
/// # Examples
///
/// ```no_run
/// use bigboard::error::{AppError, AppResult};
///
/// fn parse_delay(raw: &str) -> AppResult<u64> {
///     raw.parse()
///         .map_err(|e| AppError::Config(format!("Invalid delay '{raw}': {e}")))
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration loading and validation errors.
    Config(String),

    /// Persisted settings could not be read or written.
    Settings(String),

    /// The startup sequence stopped before reaching the home view.
    Startup(String),

    /// Outgoing HTTP request failures.
    Http(String),

    /// Terminal output failures.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Settings(msg) => write!(f, "Settings Error: {msg}"),
            AppError::Startup(msg) => write!(f, "Startup Error: {msg}"),
            AppError::Http(msg) => write!(f, "HTTP Error: {msg}"),
            AppError::Io(msg) => write!(f, "I/O Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<StartupError> for AppError {
    fn from(err: StartupError) -> Self {
        AppError::Startup(err.to_string())
    }
}

impl From<SettingsError> for AppError {
    fn from(err: SettingsError) -> Self {
        AppError::Settings(err.to_string())
    }
}

impl From<HttpError> for AppError {
    fn from(err: HttpError) -> Self {
        AppError::Http(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Logged and shown; the application keeps running
    Warning,
    /// Logged and shown; the failed operation is abandoned
    Error,
    /// Logged and shown; the application exits
    Critical,
}

/// Context information for errors
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: String,
    pub technical_details: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    /// Create new error context with component and operation
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: format!("An error occurred in {component}. Please try again."),
            technical_details: None,
            suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = message.to_string();
        self
    }

    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Contextual error with rich information
#[derive(Debug, Clone)]
pub struct ContextualError {
    pub error: AppError,
    pub context: ErrorContext,
}

impl ContextualError {
    pub fn new(error: AppError, context: ErrorContext) -> Self {
        Self { error, context }
    }

    pub fn is_critical(&self) -> bool {
        self.context.severity == ErrorSeverity::Critical
    }

    /// Message for the terminal, including the suggestion when present.
    pub fn user_message(&self) -> String {
        match &self.context.suggestion {
            Some(suggestion) => format!("{} Suggestion: {suggestion}", self.context.user_message),
            None => self.context.user_message.clone(),
        }
    }
}

impl Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.context.user_message, self.error)
    }
}

/// Central error reporting system.
///
/// Every report is logged with its context and forwarded to the lifecycle
/// loop, which shows it and exits on critical reports.
#[derive(Clone)]
pub struct ErrorReporter {
    tx: UnboundedSender<ContextualError>,
}

impl ErrorReporter {
    pub fn new(tx: UnboundedSender<ContextualError>) -> Self {
        Self { tx }
    }

    /// Report a simple error with basic context
    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    pub fn report_warning(&self, error: AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation)
            .with_technical_details(&error.to_string())
            .with_severity(ErrorSeverity::Warning);
        self.report(error, context);
    }

    /// Report an error severe enough to terminate the application
    pub fn report_critical_and_exit(
        &self,
        error: AppError,
        component: &str,
        operation: &str,
        user_message: &str,
    ) {
        let context = ErrorContext::new(component, operation)
            .with_message(user_message)
            .with_technical_details(&error.to_string())
            .with_severity(ErrorSeverity::Critical)
            .with_suggestion("The application will terminate. Please fix the issue and restart.");
        self.report(error, context);
    }

    /// Report error with full context
    pub fn report(&self, error: AppError, context: ErrorContext) {
        let details = Self::format_additional_context(&context);
        let contextual_error = ContextualError::new(error, context);
        let context = &contextual_error.context;

        match context.severity {
            ErrorSeverity::Warning => log::warn!(
                "[{}:{}] {contextual_error}{details}",
                context.component,
                context.operation
            ),
            ErrorSeverity::Error => log::error!(
                "[{}:{}] {contextual_error}{details}",
                context.component,
                context.operation
            ),
            ErrorSeverity::Critical => log::error!(
                "[CRITICAL] [{}:{}] {contextual_error}{details}",
                context.component,
                context.operation
            ),
        }

        if let Err(e) = self.tx.send(contextual_error) {
            log::error!("Failed to forward error report: {e}");
        }
    }

    fn format_additional_context(context: &ErrorContext) -> String {
        let mut parts = Vec::new();

        if let Some(ref technical_details) = context.technical_details {
            parts.push(format!("Technical: {technical_details}"));
        }

        if let Some(ref suggestion) = context.suggestion {
            parts.push(format!("Suggestion: {suggestion}"));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" | {}", parts.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_display_prefixes_category() {
        let error = AppError::Settings("disk full".to_string());
        assert_eq!(error.to_string(), "Settings Error: disk full");
    }

    #[test]
    fn test_startup_error_converts() {
        let error: AppError = StartupError::AlreadyInitialized.into();
        assert!(matches!(error, AppError::Startup(_)));
    }

    #[test]
    fn test_critical_report_is_forwarded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report_critical_and_exit(
            AppError::Config("bad".to_string()),
            "Lifecycle",
            "load_configuration",
            "Configuration is invalid",
        );

        let report = rx.try_recv().unwrap();
        assert!(report.is_critical());
        assert!(report.user_message().starts_with("Configuration is invalid"));
        assert_eq!(report.error, AppError::Config("bad".to_string()));
    }

    #[test]
    fn test_warning_is_not_critical() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let reporter = ErrorReporter::new(tx);

        reporter.report_warning(AppError::Http("timeout".to_string()), "Http", "dispatch");

        let report = rx.try_recv().unwrap();
        assert!(!report.is_critical());
        assert_eq!(report.context.severity, ErrorSeverity::Warning);
    }
}
