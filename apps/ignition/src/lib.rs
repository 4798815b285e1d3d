//! # Ignition
//!
//! The bootstrap binary's library half: configuration, the logger system,
//! and the startup sequence wiring them to `ignition-core`.
//!
//! ## Startup Order
//!
//! ```text
//! commandline ──► logger
//! ```
//!
//! Both systems are registered in that order and initialized once. The first
//! failure halts startup. The app config is loaded by the logger system, so a
//! help or version request never reads it.

pub mod config;
pub mod logger;

pub use config::{AppConfig, LogFormat};
pub use logger::{FileTarget, LOGGER_SYSTEM, LogSettings, LoggerSystem};

use ignition_core::{BootstrapContext, BootstrapError, CommandLineSystem, SystemRegistry};

/// Program name shown by `--help` and `--version`.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Program version shown by `--version`.
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the registry of global systems, in initialization order.
///
/// `load_config` runs when the logger initializes, after the command line
/// was parsed.
pub fn startup_registry<F>(load_config: F) -> Result<SystemRegistry, BootstrapError>
where
    F: FnOnce() -> Result<AppConfig, BootstrapError> + 'static,
{
    let mut registry = SystemRegistry::new();
    registry.register(CommandLineSystem::with_identity(PROGRAM_NAME, PROGRAM_VERSION))?;
    registry.register(LoggerSystem::with_loader(load_config))?;
    Ok(registry)
}

/// Run every global system against a context whose arguments are captured.
pub fn bootstrap<F>(
    context: &mut BootstrapContext,
    load_config: F,
) -> Result<SystemRegistry, BootstrapError>
where
    F: FnOnce() -> Result<AppConfig, BootstrapError> + 'static,
{
    let mut registry = startup_registry(load_config)?;
    registry.initialize_all(context)?;
    Ok(registry)
}
