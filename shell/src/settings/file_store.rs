use super::errors::SettingsError;
use super::store::{Settings, SettingsStore};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tokio::sync::Mutex;

/// Settings store backed by a JSON file on disk.
///
/// The file is read once by [`SettingsStore::init`]; afterwards getters read
/// an in-memory snapshot and every setter updates the snapshot before writing
/// the whole record back. A missing file is treated as empty settings.
pub struct JsonFileSettingsStore {
    path: PathBuf,
    snapshot: RwLock<Settings>,
    // Serializes file writes so the last setter call always wins on disk.
    write_guard: Mutex<()>,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: RwLock::new(Settings::default()),
            write_guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current in-memory settings.
    pub fn snapshot(&self) -> Settings {
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Settings)) {
        match self.snapshot.write() {
            Ok(mut guard) => apply(&mut guard),
            Err(poisoned) => apply(&mut poisoned.into_inner()),
        }
    }

    async fn persist(&self) -> Result<(), SettingsError> {
        let _guard = self.write_guard.lock().await;
        let settings = self.snapshot();

        let content =
            serde_json::to_string_pretty(&settings).map_err(|source| SettingsError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| SettingsError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| SettingsError::Io {
                path: self.path.clone(),
                source,
            })?;

        log::debug!("Settings persisted to {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn init(&self) -> Result<(), SettingsError> {
        let loaded = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str::<Settings>(&content).map_err(|source| {
                    SettingsError::Serialization {
                        path: self.path.clone(),
                        source,
                    }
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No settings file at {}, starting with defaults",
                    self.path.display()
                );
                Settings::default()
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        log::info!(
            "Settings loaded (language: {}, auth token present: {})",
            loaded.language.as_deref().unwrap_or("<unset>"),
            loaded.auth_token.is_some()
        );
        self.update(|settings| *settings = loaded);
        Ok(())
    }

    fn language(&self) -> Option<String> {
        self.snapshot().language
    }

    async fn set_language(&self, code: &str) -> Result<(), SettingsError> {
        self.update(|settings| settings.language = Some(code.to_string()));
        self.persist().await
    }

    fn auth_token(&self) -> Option<String> {
        self.snapshot().auth_token
    }

    async fn set_auth_token(&self, token: &str) -> Result<(), SettingsError> {
        self.update(|settings| settings.auth_token = Some(token.to_string()));
        self.persist().await
    }

    async fn clear_auth_token(&self) -> Result<(), SettingsError> {
        self.update(|settings| settings.auth_token = None);
        self.persist().await
    }
}
