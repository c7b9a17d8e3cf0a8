use super::errors::SettingsError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User preferences persisted between sessions.
///
/// Both fields stay absent until something explicitly sets them: the token
/// once the user authenticates, the language once startup (or the user)
/// picks one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Credential attached to outgoing requests
    #[serde(rename = "AuthToken", default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Preferred language code
    #[serde(rename = "Language", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Store for persisted user preferences.
///
/// Getters are synchronous and read the in-memory snapshot that [`init`]
/// loaded and the setters keep current. Callers must re-read on every use
/// instead of caching values, since other parts of the application may call
/// the setters at any time.
///
/// [`init`]: SettingsStore::init
///
/// # Examples
///
/// ```no_run
/// use shell::settings::{JsonFileSettingsStore, SettingsStore};
///
/// # async fn example() -> Result<(), shell::settings::SettingsError> {
/// let store = JsonFileSettingsStore::new("settings.json");
/// store.init().await?;
///
/// if store.auth_token().is_none() {
///     store.set_auth_token("dXNlcjpwYXNz").await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads persisted settings into memory.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the backing storage cannot be read or
    /// holds malformed data.
    async fn init(&self) -> Result<(), SettingsError>;

    /// Currently stored language code, if any.
    fn language(&self) -> Option<String>;

    /// Stores and persists the preferred language code.
    async fn set_language(&self, code: &str) -> Result<(), SettingsError>;

    /// Currently stored credential, if any.
    fn auth_token(&self) -> Option<String>;

    /// Stores and persists the credential.
    async fn set_auth_token(&self, token: &str) -> Result<(), SettingsError>;

    /// Removes the stored credential.
    async fn clear_auth_token(&self) -> Result<(), SettingsError>;
}
