//! # Application Configuration
//!
//! Settings the binary needs beyond the command-line flags.
//!
//! ## Sources (lowest to highest precedence)
//!
//! 1. Built-in defaults
//! 2. TOML file: `IGNITION_CONFIG`, or `ignition.toml` in the working
//!    directory when present
//! 3. Environment: `IGNITION_LOG_FILE`, `IGNITION_LOG_FORMAT`
//!
//! ## File Format
//!
//! ```toml
//! [logging]
//! file = "logs/ignition.log"
//! format = "json"   # or "text"
//! ```

use clap::ValueEnum;
use ignition_core::BootstrapError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "IGNITION_CONFIG";

/// Environment variable overriding the log file path.
pub const LOG_FILE_ENV: &str = "IGNITION_LOG_FILE";

/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "IGNITION_LOG_FORMAT";

/// Config file looked up in the working directory when `IGNITION_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "ignition.toml";

/// Log file used when nothing else is configured.
pub const DEFAULT_LOG_FILE: &str = "ignition.log";

// =============================================================================
// LOG FORMAT
// =============================================================================

/// Output format of log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

// =============================================================================
// CONFIG
// =============================================================================

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where file logging writes when `--logger-enable-file` is given.
    pub log_file: PathBuf,
    /// Format of log lines, on the console and in the log file.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    file: Option<PathBuf>,
    format: Option<LogFormat>,
}

impl AppConfig {
    /// Load from the process environment and the config file it points to.
    pub fn load() -> Result<Self, BootstrapError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Load using `env` as the environment lookup.
    pub fn resolve<F>(env: F) -> Result<Self, BootstrapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match env(CONFIG_ENV) {
            Some(path) => config.apply_file(Path::new(&path))?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    config.apply_file(fallback)?;
                }
            }
        }

        if let Some(file) = env(LOG_FILE_ENV).filter(|value| !value.is_empty()) {
            config.log_file = PathBuf::from(file);
        }
        if let Some(format) = env(LOG_FORMAT_ENV) {
            config.log_format = LogFormat::from_str(&format, true).map_err(|e| {
                BootstrapError::Config(format!("{}: {}", LOG_FORMAT_ENV, e))
            })?;
        }

        Ok(config)
    }

    /// Overlay the settings of a TOML file.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), BootstrapError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BootstrapError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        self.apply_toml(&text)
            .map_err(|e| BootstrapError::Config(format!("'{}': {}", path.display(), e)))
    }

    /// Overlay the settings of a TOML document.
    pub fn apply_toml(&mut self, text: &str) -> Result<(), BootstrapError> {
        let file: ConfigFile =
            toml::from_str(text).map_err(|e| BootstrapError::Config(e.to_string()))?;

        if let Some(path) = file.logging.file {
            self.log_file = path;
        }
        if let Some(format) = file.logging.format {
            self.log_format = format;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
