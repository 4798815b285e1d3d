//! Full startup with file logging enabled.
//!
//! Installs the global subscriber, so this file holds a single test and runs
//! in its own process.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use ignition::{AppConfig, FileTarget, LOGGER_SYSTEM, LoggerSystem};
use ignition_core::{
    BootstrapContext, BootstrapError, CommandLineSystem, GlobalSystem, SystemRegistry,
};

#[test]
fn test_startup_writes_to_appended_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_file = dir.path().join("logs").join("ignition.log");
    std::fs::create_dir_all(log_file.parent().unwrap()).unwrap();
    std::fs::write(&log_file, "previous run\n").unwrap();

    let config = AppConfig {
        log_file: log_file.clone(),
        ..AppConfig::default()
    };

    let mut context = BootstrapContext::new();
    context
        .arguments_mut()
        .capture([
            "ignition",
            "--logger-verbosity",
            "0",
            "--logger-enable-file",
            "--logger-append-file",
        ])
        .unwrap();

    let mut registry = SystemRegistry::new();
    registry.register(CommandLineSystem::new()).unwrap();
    registry.initialize_all(&mut context).unwrap();

    let mut logger = LoggerSystem::new(config);
    logger.initialize(&mut context).unwrap();

    let settings = logger.settings().unwrap();
    assert_eq!(
        settings.file,
        Some(FileTarget {
            path: log_file.clone(),
            append: true,
        })
    );

    tracing::error!("marker from logger install test");

    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.starts_with("previous run\n"));
    assert!(contents.contains("marker from logger install test"));

    // Re-entry is rejected.
    assert_eq!(
        logger.initialize(&mut context),
        Err(BootstrapError::SystemAlreadyInitialized(LOGGER_SYSTEM))
    );
}
