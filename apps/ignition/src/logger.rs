//! # Logger System
//!
//! The global system that turns the logger flags into a `tracing` subscriber.
//!
//! ## Flag Mapping
//!
//! | Flag                   | Effect                                           |
//! |------------------------|--------------------------------------------------|
//! | `--logger-verbosity N` | 0 error, 1 warn, 2 info, 3 debug, 4 trace        |
//! | `--logger-verbose`     | trace, whatever the verbosity                    |
//! | `--logger-enable-file` | also write to `AppConfig::log_file`              |
//! | `--logger-append-file` | append to the log file instead of truncating it  |
//!
//! The flags set the global level. `RUST_LOG` directives are added on top:
//! targeted ones (`my_crate=debug`) refine it, and a bare level replaces it.
//! Malformed directives are skipped.
//!
//! The app config is loaded when the system initializes, after the command
//! line was parsed, so `--help` works even with a broken config file.

use crate::config::{AppConfig, LogFormat};
use ignition_core::{
    ArgumentId, BootstrapContext, BootstrapError, COMMANDLINE_SYSTEM, FlagHandler, GlobalSystem,
};
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Registry name of the logger system.
pub const LOGGER_SYSTEM: &str = "logger";

// =============================================================================
// SETTINGS
// =============================================================================

/// Where and how file logging writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    /// Log file path.
    pub path: PathBuf,
    /// Append instead of truncating.
    pub append: bool,
}

/// Logger configuration derived from the flags and the app config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Most verbose level emitted.
    pub level: LevelFilter,
    /// Console line format.
    pub format: LogFormat,
    /// File output, when enabled.
    pub file: Option<FileTarget>,
    /// `--logger-append-file` was given without `--logger-enable-file`.
    pub append_ignored: bool,
}

impl LogSettings {
    /// Derive settings from parsed flags.
    pub fn from_flags(flags: &FlagHandler, config: &AppConfig) -> Result<Self, BootstrapError> {
        let verbosity = flags.integer(ArgumentId::LoggerVerbosity)?;
        let verbose = flags.switch(ArgumentId::LoggerVerbose)?;
        let enable_file = flags.switch(ArgumentId::LoggerEnableFile)?;
        let append = flags.switch(ArgumentId::LoggerAppendFile)?;

        let level = if verbose {
            LevelFilter::TRACE
        } else {
            level_for_verbosity(verbosity)
        };

        let file = enable_file.then(|| FileTarget {
            path: config.log_file.clone(),
            append,
        });

        Ok(Self {
            level,
            format: config.log_format,
            file,
            append_ignored: append && !enable_file,
        })
    }
}

/// Map a verbosity value onto a level filter. Values above 4 mean trace.
#[must_use]
pub fn level_for_verbosity(verbosity: u32) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Open the log file, creating it and its directory as needed.
pub fn open_log_file(target: &FileTarget) -> Result<File, BootstrapError> {
    if let Some(parent) = target.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BootstrapError::Io(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if target.append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options.open(&target.path).map_err(|e| {
        BootstrapError::Io(format!(
            "Cannot open log file '{}': {}",
            target.path.display(),
            e
        ))
    })
}

// =============================================================================
// SUBSCRIBER INSTALLATION
// =============================================================================

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Build the level filter: `level` first, then each parsable directive.
#[must_use]
pub fn env_filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    directives
        .into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(
            EnvFilter::default().add_directive(level.into()),
            EnvFilter::add_directive,
        )
}

/// Install the global `tracing` subscriber described by `settings`.
///
/// Console and file lines share `settings.format`. Can succeed once per process.
pub fn install(settings: &LogSettings) -> Result<(), BootstrapError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = env_filter(settings.level, directives.as_deref());

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(match settings.format {
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
    });
    if let Some(target) = &settings.file {
        let writer = Mutex::new(open_log_file(target)?);
        layers.push(match settings.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
            LogFormat::Text => fmt::layer().with_ansi(false).with_writer(writer).boxed(),
        });
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| BootstrapError::SystemFailed {
            system: LOGGER_SYSTEM,
            reason: e.to_string(),
        })
}

// =============================================================================
// GLOBAL SYSTEM
// =============================================================================

type ConfigLoader = Box<dyn FnOnce() -> Result<AppConfig, BootstrapError>>;

/// Installs logging once the command line has been parsed.
pub struct LoggerSystem {
    loader: Option<ConfigLoader>,
    settings: Option<LogSettings>,
}

impl std::fmt::Debug for LoggerSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerSystem")
            .field("config_loaded", &self.loader.is_none())
            .field("settings", &self.settings)
            .finish()
    }
}

impl LoggerSystem {
    /// Create a logger system using `config` for file path and format.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self::with_loader(move || Ok(config))
    }

    /// Create a logger system that loads its config during `initialize`.
    #[must_use]
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: FnOnce() -> Result<AppConfig, BootstrapError> + 'static,
    {
        Self {
            loader: Some(Box::new(loader)),
            settings: None,
        }
    }

    /// Settings in effect after initialization.
    #[must_use]
    pub fn settings(&self) -> Option<&LogSettings> {
        self.settings.as_ref()
    }
}

impl GlobalSystem for LoggerSystem {
    fn name(&self) -> &'static str {
        LOGGER_SYSTEM
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &[COMMANDLINE_SYSTEM]
    }

    fn initialize(&mut self, context: &mut BootstrapContext) -> Result<(), BootstrapError> {
        let loader = self
            .loader
            .take()
            .ok_or(BootstrapError::SystemAlreadyInitialized(LOGGER_SYSTEM))?;
        let config = loader()?;

        let settings = LogSettings::from_flags(context.flags(), &config)?;
        install(&settings)?;

        tracing::info!(
            level = %settings.level,
            file = ?settings.file.as_ref().map(|target| target.path.display().to_string()),
            "logger ready"
        );
        if settings.append_ignored {
            tracing::warn!("--logger-append-file has no effect without --logger-enable-file");
        }

        self.settings = Some(settings);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ignition_core::CommandLineSystem;
    use std::io::Write;

    fn parsed(tokens: &[&str]) -> BootstrapContext {
        let mut context = BootstrapContext::new();
        context
            .arguments_mut()
            .capture(tokens.iter().copied())
            .expect("capture");
        CommandLineSystem::new()
            .initialize(&mut context)
            .expect("commandline");
        context
    }

    #[test]
    fn defaults_give_info_without_file() {
        let context = parsed(&["app"]);
        let settings =
            LogSettings::from_flags(context.flags(), &AppConfig::default()).expect("settings");

        assert_eq!(settings.level, LevelFilter::INFO);
        assert_eq!(settings.file, None);
        assert!(!settings.append_ignored);
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for_verbosity(0), LevelFilter::ERROR);
        assert_eq!(level_for_verbosity(1), LevelFilter::WARN);
        assert_eq!(level_for_verbosity(3), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(4), LevelFilter::TRACE);
    }

    #[test]
    fn verbose_overrides_verbosity() {
        let context = parsed(&["app", "--logger-verbosity", "0", "--logger-verbose"]);
        let settings =
            LogSettings::from_flags(context.flags(), &AppConfig::default()).expect("settings");

        assert_eq!(settings.level, LevelFilter::TRACE);
    }

    #[test]
    fn file_target_follows_flags_and_config() {
        let context = parsed(&["app", "--logger-enable-file", "--logger-append-file"]);
        let config = AppConfig {
            log_file: PathBuf::from("var/app.log"),
            ..AppConfig::default()
        };
        let settings = LogSettings::from_flags(context.flags(), &config).expect("settings");

        assert_eq!(
            settings.file,
            Some(FileTarget {
                path: PathBuf::from("var/app.log"),
                append: true,
            })
        );
    }

    #[test]
    fn append_without_file_is_flagged() {
        let context = parsed(&["app", "--logger-append-file"]);
        let settings =
            LogSettings::from_flags(context.flags(), &AppConfig::default()).expect("settings");

        assert_eq!(settings.file, None);
        assert!(settings.append_ignored);
    }

    #[test]
    fn settings_require_parsed_flags() {
        let context = BootstrapContext::new();
        let result = LogSettings::from_flags(context.flags(), &AppConfig::default());
        assert_eq!(result, Err(BootstrapError::FlagsNotParsed));
    }

    #[test]
    fn flag_level_is_the_filter_default() {
        let filter = env_filter(LevelFilter::WARN, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn targeted_directives_refine_the_flag_level() {
        let filter = env_filter(LevelFilter::WARN, Some("ignition=trace"));
        let rendered = filter.to_string();

        assert!(rendered.contains("ignition=trace"));
        assert!(rendered.contains("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn bare_directive_replaces_the_flag_level() {
        let filter = env_filter(LevelFilter::ERROR, Some("debug"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn malformed_directives_are_skipped() {
        let filter = env_filter(LevelFilter::INFO, Some("some_target=fake level, ,"));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn config_error_surfaces_from_initialize() {
        let mut context = parsed(&["app"]);
        let mut logger = LoggerSystem::with_loader(|| {
            Err(BootstrapError::Config("broken config".to_string()))
        });

        assert_eq!(
            logger.initialize(&mut context),
            Err(BootstrapError::Config("broken config".to_string()))
        );
        assert!(logger.settings().is_none());
    }

    #[test]
    fn truncate_and_append_modes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("app.log");

        let truncate = FileTarget {
            path: path.clone(),
            append: false,
        };
        let append = FileTarget {
            path: path.clone(),
            append: true,
        };

        writeln!(open_log_file(&truncate).expect("open"), "first").expect("write");
        writeln!(open_log_file(&append).expect("open"), "second").expect("write");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read"),
            "first\nsecond\n"
        );

        writeln!(open_log_file(&truncate).expect("open"), "third").expect("write");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "third\n");
    }
}
