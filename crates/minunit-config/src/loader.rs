//! Configuration Loader
//!
//! Handles loading configuration from minunit.toml and applying environment overrides.

use crate::project::{validate_epsilon, ColorChoice, OutputConfig, ProjectConfig};
use crate::{ConfigError, ConfigResult, CONFIG_FILE_NAME, DEFAULT_EPSILON, DEFAULT_MESSAGE_CAPACITY};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader
///
/// Loads configuration with the following precedence:
/// 1. Built-in defaults - lowest priority
/// 2. Project config (minunit.toml) - overrides defaults
/// 3. Environment variables (MINUNIT_*, NO_COLOR) - overrides project
/// 4. CLI flags - highest priority (handled by caller)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Skip environment overrides (used by hosts that want file-only config)
    ignore_env: bool,
}

/// Merged configuration result
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Project configuration
    pub project: ProjectConfig,

    /// Directory where minunit.toml was found
    pub project_root: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self { ignore_env: false }
    }

    /// Do not consult environment variables
    pub fn without_env(mut self) -> Self {
        self.ignore_env = true;
        self
    }

    /// Load configuration starting from the given directory
    ///
    /// Walks up the directory tree to find minunit.toml. A missing file is not
    /// an error; defaults are used instead.
    pub fn load_from_directory(&self, start_dir: &Path) -> ConfigResult<Config> {
        let (project_root, project_config) = self.find_project_config(start_dir)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root,
        })
    }

    /// Load configuration from a specific config file
    pub fn load_from_file(&self, config_path: &Path) -> ConfigResult<Config> {
        let project_config = ProjectConfig::load_from_file(config_path)?;
        let project_config = self.apply_env_overrides(project_config)?;

        Ok(Config {
            project: project_config,
            project_root: config_path.parent().map(|p| p.to_path_buf()),
        })
    }

    /// Find project configuration by walking up directory tree
    fn find_project_config(
        &self,
        start_dir: &Path,
    ) -> ConfigResult<(Option<PathBuf>, ProjectConfig)> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);

            if config_path.exists() {
                log::debug!("loading {}", config_path.display());
                let project_config = ProjectConfig::load_from_file(&config_path)?;
                return Ok((Some(current), project_config));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    log::debug!("no {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok((None, ProjectConfig::default()));
                }
            }
        }
    }

    /// Apply environment variable overrides to project config
    ///
    /// Recognized variables:
    /// - `MINUNIT_COLOR=auto|always|never`
    /// - `NO_COLOR` (any value) forces `never`, winning over `MINUNIT_COLOR`
    /// - `MINUNIT_VERBOSE=true|false`
    /// - `MINUNIT_EPSILON=<float>`
    fn apply_env_overrides(&self, mut config: ProjectConfig) -> ConfigResult<ProjectConfig> {
        if self.ignore_env {
            return Ok(config);
        }

        if let Ok(color) = env::var("MINUNIT_COLOR") {
            let choice: ColorChoice = color.parse()?;
            output_mut(&mut config).color = Some(choice);
        }

        if env::var_os("NO_COLOR").is_some() {
            output_mut(&mut config).color = Some(ColorChoice::Never);
        }

        if let Ok(verbose) = env::var("MINUNIT_VERBOSE") {
            output_mut(&mut config).verbose = Some(parse_flag("MINUNIT_VERBOSE", &verbose)?);
        }

        if let Ok(epsilon) = env::var("MINUNIT_EPSILON") {
            let value: f64 = epsilon.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "MINUNIT_EPSILON".to_string(),
                reason: format!("'{}' is not a number", epsilon),
            })?;
            validate_epsilon(value)?;
            config
                .assertions
                .get_or_insert_with(Default::default)
                .epsilon = Some(value);
        }

        Ok(config)
    }
}

/// Parse a boolean environment value, rejecting anything unrecognised
fn parse_flag(name: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: name.to_string(),
            reason: format!("expected true or false, got '{}'", value),
        }),
    }
}

fn output_mut(config: &mut ProjectConfig) -> &mut OutputConfig {
    config.output.get_or_insert_with(Default::default)
}

impl Config {
    /// Effective color choice (project > default)
    pub fn color(&self) -> ColorChoice {
        self.project.color().unwrap_or_default()
    }

    /// Effective verbose preference (project > default)
    pub fn verbose(&self) -> bool {
        self.project.verbose().unwrap_or(false)
    }

    /// Effective floating-point tolerance (project > default)
    pub fn epsilon(&self) -> f64 {
        self.project.epsilon().unwrap_or(DEFAULT_EPSILON)
    }

    /// Effective message buffer capacity (project > default)
    pub fn message_capacity(&self) -> usize {
        self.project
            .message_capacity()
            .unwrap_or(DEFAULT_MESSAGE_CAPACITY)
    }

    /// Get the project root directory
    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// Check if a minunit.toml was found
    pub fn is_project(&self) -> bool {
        self.project_root.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn create_config_file(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[assertions]
epsilon = 1e-6
"#,
        );

        let config = ConfigLoader::new()
            .without_env()
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert_eq!(config.epsilon(), 1e-6);
        assert!(config.is_project());
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[output]
color = "always"
"#,
        );

        let sub_dir = temp_dir.path().join("subdir");
        fs::create_dir(&sub_dir).unwrap();

        let config = ConfigLoader::new()
            .without_env()
            .load_from_directory(&sub_dir)
            .unwrap();

        assert_eq!(config.color(), ColorChoice::Always);
        assert_eq!(config.project_root(), Some(temp_dir.path()));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.epsilon(), DEFAULT_EPSILON);
        assert_eq!(config.message_capacity(), DEFAULT_MESSAGE_CAPACITY);
        assert_eq!(config.color(), ColorChoice::Auto);
        assert!(!config.verbose());
        assert!(!config.is_project());
    }

    #[test]
    #[serial]
    fn test_env_override_color() {
        let temp_dir = TempDir::new().unwrap();
        create_config_file(
            temp_dir.path(),
            r#"
[output]
color = "always"
"#,
        );

        env::remove_var("NO_COLOR");
        env::set_var("MINUNIT_COLOR", "never");

        let config = ConfigLoader::new()
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert_eq!(config.color(), ColorChoice::Never);

        env::remove_var("MINUNIT_COLOR");
    }

    #[test]
    #[serial]
    fn test_env_no_color_wins() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("MINUNIT_COLOR", "always");
        env::set_var("NO_COLOR", "1");

        let config = ConfigLoader::new()
            .load_from_directory(temp_dir.path())
            .unwrap();

        assert_eq!(config.color(), ColorChoice::Never);

        env::remove_var("MINUNIT_COLOR");
        env::remove_var("NO_COLOR");
    }

    #[test]
    #[serial]
    fn test_env_invalid_epsilon() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("MINUNIT_EPSILON", "tiny");

        let result = ConfigLoader::new().load_from_directory(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

        env::remove_var("MINUNIT_EPSILON");
    }

    #[test]
    #[serial]
    fn test_env_verbose_parsed_strictly() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var("MINUNIT_VERBOSE", "on");
        let config = ConfigLoader::new()
            .load_from_directory(temp_dir.path())
            .unwrap();
        assert!(config.verbose());

        env::set_var("MINUNIT_VERBOSE", "verbos");
        let result = ConfigLoader::new().load_from_directory(temp_dir.path());
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "MINUNIT_VERBOSE"
        ));

        env::remove_var("MINUNIT_VERBOSE");
    }

    #[test]
    fn test_load_from_specific_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config_file(
            temp_dir.path(),
            r#"
[assertions]
message_capacity = 128
"#,
        );

        let config = ConfigLoader::new()
            .without_env()
            .load_from_file(&config_path)
            .unwrap();

        assert_eq!(config.message_capacity(), 128);
    }
}
