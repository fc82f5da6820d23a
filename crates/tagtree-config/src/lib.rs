//! Configuration management for tagtree.
//!
//! Parses `tagtree.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `document.lang`
//! - `output.encoding`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override document language.
    pub lang: Option<String>,
    /// Override output encoding label.
    pub encoding: Option<String>,
    /// Override read buffer size.
    pub buffer_size: Option<usize>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tagtree.toml";

/// Upper bound for `output.buffer_size`.
const MAX_BUFFER_SIZE: usize = 16 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Document skeleton configuration.
    pub document: DocumentConfig,
    /// Output encoding configuration.
    pub output: OutputConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Document skeleton configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// `lang` attribute of the `html` root.
    pub lang: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            lang: tagtree::DEFAULT_LANG.to_owned(),
        }
    }
}

/// Output encoding configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// WHATWG encoding label.
    pub encoding: String,
    /// Bytes requested from the reader per fill.
    pub buffer_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            encoding: "utf-8".to_owned(),
            buffer_size: 8192,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`document.lang`").
        field: String,
        /// Error message (e.g., "${`SITE_LANG`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tagtree.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(lang) = &settings.lang {
            self.document.lang.clone_from(lang);
        }
        if let Some(encoding) = &settings.encoding {
            self.output.encoding.clone_from(encoding);
        }
        if let Some(buffer_size) = settings.buffer_size {
            self.output.buffer_size = buffer_size;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "Discovered config file");
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.document.lang, "document.lang")?;
        require_non_empty(&self.output.encoding, "output.encoding")?;

        if tagtree::resolve_encoding(&self.output.encoding).is_err() {
            return Err(ConfigError::Validation(format!(
                "output.encoding \"{}\" is not a known encoding label",
                self.output.encoding
            )));
        }

        let size = self.output.buffer_size;
        if size == 0 {
            return Err(ConfigError::Validation(
                "output.buffer_size must be greater than 0".to_owned(),
            ));
        }
        if size > MAX_BUFFER_SIZE {
            return Err(ConfigError::Validation(format!(
                "output.buffer_size cannot exceed {MAX_BUFFER_SIZE}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.document.lang = expand::expand_env(&self.document.lang, "document.lang")?;
        self.output.encoding = expand::expand_env(&self.output.encoding, "output.encoding")?;
        Ok(())
    }
}
