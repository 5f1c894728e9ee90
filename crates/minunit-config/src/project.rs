//! Project Configuration (minunit.toml)
//!
//! Handles project-level configuration stored in `minunit.toml`.

use crate::{ConfigError, ConfigResult, MIN_MESSAGE_CAPACITY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Project configuration from minunit.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Console output settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,

    /// Assertion settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assertions: Option<AssertionsConfig>,
}

/// Console output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// When to emit ANSI color sequences (default: auto)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorChoice>,

    /// Prefer the verbose convention where a host offers both
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

/// Assertion configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct AssertionsConfig {
    /// Absolute tolerance for floating-point equality (default: 1e-12)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,

    /// Capacity of the last-failure message buffer in bytes (default: 1024)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_capacity: Option<usize>,
}

/// Color output policy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Let the terminal detection of `colored` decide
    #[default]
    Auto,
    /// Always emit color sequences
    Always,
    /// Never emit color sequences
    Never,
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" | "on" | "true" | "1" => Ok(ColorChoice::Always),
            "never" | "off" | "false" | "0" => Ok(ColorChoice::Never),
            other => Err(ConfigError::InvalidValue {
                field: "output.color".to_string(),
                reason: format!("expected auto, always or never, got '{}'", other),
            }),
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorChoice::Auto => "auto",
            ColorChoice::Always => "always",
            ColorChoice::Never => "never",
        };
        f.write_str(s)
    }
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::IoError(e)
            }
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
            file: path.to_path_buf(),
            error: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the project configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(assertions) = &self.assertions {
            if let Some(epsilon) = assertions.epsilon {
                validate_epsilon(epsilon)?;
            }

            if let Some(capacity) = assertions.message_capacity {
                if capacity < MIN_MESSAGE_CAPACITY {
                    return Err(ConfigError::InvalidValue {
                        field: "assertions.message_capacity".to_string(),
                        reason: format!(
                            "capacity must be at least {} bytes, got {}",
                            MIN_MESSAGE_CAPACITY, capacity
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Get the configured color choice, if present
    pub fn color(&self) -> Option<ColorChoice> {
        self.output.as_ref().and_then(|o| o.color)
    }

    /// Get the configured verbose preference, if present
    pub fn verbose(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.verbose)
    }

    /// Get the configured epsilon, if present
    pub fn epsilon(&self) -> Option<f64> {
        self.assertions.as_ref().and_then(|a| a.epsilon)
    }

    /// Get the configured message capacity, if present
    pub fn message_capacity(&self) -> Option<usize> {
        self.assertions.as_ref().and_then(|a| a.message_capacity)
    }

    /// Merge another project config into this one
    /// Other config takes precedence for non-None values
    pub fn merge(&mut self, other: &ProjectConfig) {
        if let Some(other_output) = &other.output {
            let output = self.output.get_or_insert_with(Default::default);
            if other_output.color.is_some() {
                output.color = other_output.color;
            }
            if other_output.verbose.is_some() {
                output.verbose = other_output.verbose;
            }
        }
        if let Some(other_assertions) = &other.assertions {
            let assertions = self.assertions.get_or_insert_with(Default::default);
            if other_assertions.epsilon.is_some() {
                assertions.epsilon = other_assertions.epsilon;
            }
            if other_assertions.message_capacity.is_some() {
                assertions.message_capacity = other_assertions.message_capacity;
            }
        }
    }
}

/// Epsilon must be a positive, finite tolerance
pub(crate) fn validate_epsilon(epsilon: f64) -> ConfigResult<()> {
    if !epsilon.is_finite() || epsilon <= 0.0 {
        return Err(ConfigError::InvalidValue {
            field: "assertions.epsilon".to_string(),
            reason: format!("epsilon must be positive and finite, got {}", epsilon),
        });
    }
    Ok(())
}
