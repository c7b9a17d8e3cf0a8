//! Persisted user preferences.
//!
//! The shell only consumes settings through the [`SettingsStore`] trait; the
//! [`JsonFileSettingsStore`] is the implementation the application ships with.

pub mod errors;
pub mod file_store;
pub mod store;

pub use errors::SettingsError;
pub use file_store::JsonFileSettingsStore;
pub use store::{Settings, SettingsStore};
