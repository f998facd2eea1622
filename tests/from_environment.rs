//! Environment-driven configuration and initialization.

mod common;

use std::collections::HashMap;
use std::fs;
use std::panic;

use common::EnvGuard;
use svclog::config::{DotenvFile, Loader, ProcessEnv};
use svclog::{Environment, ErrorKind, InitError, LoadError, Severity};

fn write_env_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_process_environment_is_normalized() {
    let mut env = EnvGuard::new();
    env.set_logger_vars("warn", "Development", "Billing-API");

    let config = svclog::from_environment().unwrap();
    assert_eq!(config.level(), Severity::Warn);
    assert_eq!(config.environment(), Environment::Development);
    assert_eq!(config.service_name(), "Billing-API");
}

#[test]
fn test_missing_variables_are_named() {
    let cases = [
        (None, Some("production"), Some("svc"), "LOG_LEVEL"),
        (Some("INFO"), None, Some("svc"), "APP_ENV"),
        (Some("INFO"), Some("production"), None, "APP_NAME"),
        (Some("INFO"), Some("production"), Some(""), "APP_NAME"),
    ];

    for (level, app_env, name, missing) in cases {
        let mut env = EnvGuard::new();
        if let Some(level) = level {
            env.set("LOG_LEVEL", level);
        }
        if let Some(app_env) = app_env {
            env.set("APP_ENV", app_env);
        }
        if let Some(name) = name {
            env.set("APP_NAME", name);
        }

        let err = svclog::from_environment().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredEnvVar, "case {missing}");
        assert_eq!(err.missing_var(), Some(missing));
        assert!(err.to_string().contains(missing));
    }
}

#[test]
fn test_invalid_values_keep_their_cause() {
    let mut env = EnvGuard::new();
    env.set_logger_vars("verbose", "production", "svc");
    let err = svclog::from_environment().unwrap_err();
    assert!(err.is(ErrorKind::InvalidLogLevel));
    assert!(!err.is(ErrorKind::InvalidEnvironment));

    env.set_logger_vars("INFO", "staging", "svc");
    let err = svclog::from_environment().unwrap_err();
    assert!(err.is(ErrorKind::InvalidEnvironment));
    assert!(err.to_string().contains("staging"));

    env.set_logger_vars("INFO", "production", "   ");
    let err = svclog::from_environment().unwrap_err();
    assert!(err.is(ErrorKind::MissingServiceName));
}

#[test]
fn test_env_file_supplements_outside_production() {
    let mut env = EnvGuard::new();
    env.set("APP_ENV", "development");
    env.set("APP_NAME", "from-process");
    let (_dir, path) = write_env_file("LOG_LEVEL=debug\nAPP_NAME=from-file\n");

    let config = Loader::new(ProcessEnv, DotenvFile::new(&path)).load().unwrap();
    assert_eq!(config.level(), Severity::Debug);
    // process values win over the file
    assert_eq!(config.service_name(), "from-process");
}

#[test]
fn test_env_file_skipped_in_production() {
    let mut env = EnvGuard::new();
    env.set("APP_ENV", "PRODUCTION");
    env.set("APP_NAME", "svc");
    let (_dir, path) = write_env_file("LOG_LEVEL=INFO\n");

    let err = Loader::new(ProcessEnv, DotenvFile::new(&path))
        .load()
        .unwrap_err();
    assert_eq!(err.missing_var(), Some("LOG_LEVEL"));
    assert!(std::env::var("LOG_LEVEL").is_err());
}

#[test]
fn test_env_file_feeds_an_in_memory_source() {
    let _env = EnvGuard::new();
    let (_dir, path) = write_env_file("LOG_LEVEL=error\nAPP_NAME=from-file\n");
    let vars: HashMap<String, String> = [("APP_ENV".to_string(), "development".to_string())]
        .into_iter()
        .collect();

    let config = Loader::new(&vars, DotenvFile::new(&path)).load().unwrap();
    assert_eq!(config.level(), Severity::Error);
    assert_eq!(config.service_name(), "from-file");
}

#[cfg(unix)]
#[test]
fn test_non_unicode_value_is_not_missing() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let mut env = EnvGuard::new();
    env.set_logger_vars("INFO", "production", "svc");
    env.set("APP_NAME", OsString::from_vec(vec![b's', 0xff, b'c']));

    let err = svclog::from_environment().unwrap_err();
    assert!(matches!(err, LoadError::NotUnicode { ref name } if name == "APP_NAME"));
    assert_eq!(err.missing_var(), None);
    assert!(err.to_string().contains("APP_NAME"));

    let err = svclog::config::require_env("APP_NAME").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_malformed_env_file_is_reported() {
    let mut env = EnvGuard::new();
    env.set("APP_ENV", "development");
    let (_dir, path) = write_env_file("THIS IS NOT VALID\n");

    let err = Loader::new(ProcessEnv, DotenvFile::new(&path))
        .load()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EnvFile);
    assert!(matches!(err, LoadError::EnvFile { .. }));
}

#[test]
fn test_must_from_environment_panics_with_cause() {
    let _env = EnvGuard::new();

    let payload = panic::catch_unwind(svclog::must_from_environment).unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.starts_with("failed to load configuration from environment:"));
    assert!(message.contains("LOG_LEVEL"));
}

#[test]
fn test_must_init_from_environment_panics_with_cause() {
    let mut env = EnvGuard::new();
    env.set_logger_vars("INFO", "production", "svc");
    env.remove("APP_NAME");

    let payload = panic::catch_unwind(svclog::must_init_from_environment).unwrap_err();
    let message = payload.downcast_ref::<String>().unwrap();
    assert!(message.starts_with("failed to initialize logger from environment:"));
    assert!(message.contains("APP_NAME"));
}

#[test]
fn test_init_from_environment_installs_once() {
    let mut env = EnvGuard::new();

    let err = svclog::init_from_environment().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.is(ErrorKind::MissingRequiredEnvVar));

    env.set_logger_vars("ERROR", "production", "env-init");
    svclog::init_from_environment().unwrap();
    assert!(svclog::is_initialized());
    assert_eq!(svclog::get().fields()["service"], "env-init");
    assert_eq!(svclog::get().fields()["environment"], "production");

    let err = svclog::init_from_environment().unwrap_err();
    assert!(matches!(err, InitError::AlreadyInitialized));
}
