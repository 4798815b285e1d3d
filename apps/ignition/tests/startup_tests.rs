//! Startup sequence tests for the binary's system registry.
//!
//! None of these reach the logger's subscriber installation, so they can
//! share one test process.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use ignition::{AppConfig, LOGGER_SYSTEM, PROGRAM_VERSION, startup_registry};
use ignition_core::{
    ArgumentId, BootstrapContext, BootstrapError, COMMANDLINE_SYSTEM, SystemState,
};

fn default_config() -> Result<AppConfig, BootstrapError> {
    Ok(AppConfig::default())
}

fn broken_config() -> Result<AppConfig, BootstrapError> {
    Err(BootstrapError::Config("'ignition.toml': expected a table".to_string()))
}

fn captured(tokens: &[&str]) -> BootstrapContext {
    let mut context = BootstrapContext::new();
    context
        .arguments_mut()
        .populate_arguments(tokens.len(), tokens)
        .unwrap();
    context
}

// =============================================================================
// REGISTRY ORDER
// =============================================================================

#[test]
fn test_registry_orders_commandline_before_logger() {
    let registry = startup_registry(default_config).unwrap();

    assert_eq!(registry.names(), vec![COMMANDLINE_SYSTEM, LOGGER_SYSTEM]);
    assert_eq!(registry.state(LOGGER_SYSTEM), Some(SystemState::Pending));
    assert!(!registry.has_run());
}

// =============================================================================
// HALTING STARTUP
// =============================================================================

#[test]
fn test_help_request_stops_before_logger() {
    let mut registry = startup_registry(default_config).unwrap();
    let mut context = captured(&["ignition", "--help"]);

    let err = registry.initialize_all(&mut context).unwrap_err();

    match err {
        BootstrapError::DisplayRequested(text) => {
            assert!(text.contains("--logger-enable-file"));
        }
        other => panic!("expected help output, got {:?}", other),
    }
    assert_eq!(registry.state(LOGGER_SYSTEM), Some(SystemState::Pending));
}

#[test]
fn test_help_request_ignores_broken_config() {
    let mut context = captured(&["ignition", "--help"]);

    let err = ignition::bootstrap(&mut context, broken_config).unwrap_err();

    assert!(matches!(err, BootstrapError::DisplayRequested(_)));
}

#[test]
fn test_version_request_prints_package_version() {
    let mut context = captured(&["ignition", "--version"]);

    let err = ignition::bootstrap(&mut context, broken_config).unwrap_err();

    match err {
        BootstrapError::DisplayRequested(text) => assert!(text.contains(PROGRAM_VERSION)),
        other => panic!("expected version output, got {:?}", other),
    }
}

#[test]
fn test_broken_config_halts_at_logger() {
    let mut registry = startup_registry(broken_config).unwrap();
    let mut context = captured(&["ignition"]);

    let err = registry.initialize_all(&mut context).unwrap_err();

    assert!(matches!(err, BootstrapError::Config(_)));
    assert_eq!(
        registry.state(COMMANDLINE_SYSTEM),
        Some(SystemState::Initialized)
    );
    assert_eq!(registry.state(LOGGER_SYSTEM), Some(SystemState::Failed));
}

#[test]
fn test_invalid_verbosity_halts_startup() {
    let mut context = captured(&["ignition", "--logger-verbosity", "verbose"]);

    let err = ignition::bootstrap(&mut context, default_config).unwrap_err();

    assert_eq!(
        err,
        BootstrapError::InvalidFlagValue {
            flag: ArgumentId::LoggerVerbosity,
            value: "verbose".to_string(),
            reason: "expected a non-negative integer".to_string(),
        }
    );
}

#[test]
fn test_unknown_flag_halts_startup() {
    let mut context = captured(&["ignition", "--logger-colour"]);

    let err = ignition::bootstrap(&mut context, default_config).unwrap_err();

    assert!(err.is_parse_error());
}

#[test]
fn test_uncaptured_context_halts_startup() {
    let mut context = BootstrapContext::new();

    let err = ignition::bootstrap(&mut context, default_config).unwrap_err();

    assert_eq!(err, BootstrapError::ArgumentsNotCaptured);
    assert!(err.is_precondition_violation());
}
