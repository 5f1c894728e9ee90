//! minunit Configuration System
//!
//! Provides configuration for minunit test programs:
//! - Project configuration (minunit.toml)
//! - Environment variable overrides
//! - Validation of assertion parameters
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded and merged in the following order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Project config (./minunit.toml, searched upwards)
//! 3. Environment variables (MINUNIT_*, NO_COLOR)
//! 4. CLI flags (handled by the caller)
//!
//! # Example
//!
//! ```no_run
//! use minunit_config::ConfigLoader;
//! use std::path::Path;
//!
//! let loader = ConfigLoader::new();
//! let config = loader.load_from_directory(Path::new(".")).unwrap();
//! assert!(config.epsilon() > 0.0);
//! ```

pub mod loader;
pub mod project;

use std::path::PathBuf;
use thiserror::Error;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "minunit.toml";

/// Default absolute tolerance for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Default capacity, in bytes, of the last-failure message buffer
pub const DEFAULT_MESSAGE_CAPACITY: usize = 1024;

/// Smallest message capacity accepted by validation
pub const MIN_MESSAGE_CAPACITY: usize = 64;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax in {file}: {error}")]
    TomlParseError {
        file: PathBuf,
        error: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

// Re-export main types
pub use loader::{Config, ConfigLoader};
pub use project::{AssertionsConfig, ColorChoice, OutputConfig, ProjectConfig};
