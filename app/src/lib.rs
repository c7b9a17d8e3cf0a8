//! # BigBoard
//!
//! Terminal host for the BigBoard application shell. Loads configuration,
//! installs logging, assembles the shell and prints connection labels and
//! page changes until interrupted.
//!
//! ## Modules
//!
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types and centralized error reporting
//! - [`lifecycle`] - Startup, main loop and shutdown
//! - [`logger`] - Logging configuration
//! - [`platform`] - Terminal implementation of the native chrome
//!
//! This library interface enables integration testing by providing access to internal modules.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod logger;
pub mod platform;

pub use error::{AppError, AppResult};
