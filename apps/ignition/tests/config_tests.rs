//! Configuration layering tests: defaults, TOML file, environment.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use ignition::{AppConfig, LogFormat};
use ignition::config::{CONFIG_ENV, DEFAULT_LOG_FILE, LOG_FILE_ENV, LOG_FORMAT_ENV};
use ignition_core::BootstrapError;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn write_config(dir: &tempfile::TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("ignition.toml");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_defaults_without_sources() {
    let config = AppConfig::resolve(env_of(&[])).unwrap();

    assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    assert_eq!(config.log_format, LogFormat::Text);
}

#[test]
fn test_file_then_env_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        "[logging]\nfile = \"from-file.log\"\nformat = \"json\"\n",
    );
    let path = path.to_str().unwrap();

    let from_file = AppConfig::resolve(env_of(&[(CONFIG_ENV, path)])).unwrap();
    assert_eq!(from_file.log_file, PathBuf::from("from-file.log"));
    assert_eq!(from_file.log_format, LogFormat::Json);

    let overridden = AppConfig::resolve(env_of(&[
        (CONFIG_ENV, path),
        (LOG_FILE_ENV, "from-env.log"),
        (LOG_FORMAT_ENV, "TEXT"),
    ]))
    .unwrap();
    assert_eq!(overridden.log_file, PathBuf::from("from-env.log"));
    assert_eq!(overridden.log_format, LogFormat::Text);
}

#[test]
fn test_empty_log_file_env_is_ignored() {
    let config = AppConfig::resolve(env_of(&[(LOG_FILE_ENV, "")])).unwrap();
    assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
}

#[test]
fn test_missing_explicit_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let result = AppConfig::resolve(env_of(&[(CONFIG_ENV, missing.to_str().unwrap())]));

    assert!(matches!(result, Err(BootstrapError::Config(_))));
}

#[test]
fn test_invalid_format_env_is_error() {
    let result = AppConfig::resolve(env_of(&[(LOG_FORMAT_ENV, "yaml")]));

    match result {
        Err(BootstrapError::Config(message)) => assert!(message.contains(LOG_FORMAT_ENV)),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_malformed_toml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(&dir, "[logging\nfile = ");

    let result = AppConfig::resolve(env_of(&[(CONFIG_ENV, path.to_str().unwrap())]));

    assert!(matches!(result, Err(BootstrapError::Config(_))));
}
