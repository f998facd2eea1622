//! Package-level shortcuts over the global logger.
//!
//! Every emission resolves the global logger through [`get`], so calling any
//! of these before initialization panics just like `get()` does.

use std::time::Duration;

use crate::error::SyncError;
use crate::lifecycle::global::{get, try_get};
use crate::observability::{Field, Logger};

#[track_caller]
pub fn debug(message: &str, fields: impl IntoIterator<Item = Field>) {
    get().debug(message, fields);
}

#[track_caller]
pub fn info(message: &str, fields: impl IntoIterator<Item = Field>) {
    get().info(message, fields);
}

#[track_caller]
pub fn warn(message: &str, fields: impl IntoIterator<Item = Field>) {
    get().warn(message, fields);
}

#[track_caller]
pub fn error(message: &str, fields: impl IntoIterator<Item = Field>) {
    get().error(message, fields);
}

/// Log at `FATAL` through the global logger and exit the process.
///
/// Only for unrecoverable startup failures.
#[track_caller]
pub fn fatal(message: &str, fields: impl IntoIterator<Item = Field>) -> ! {
    get().fatal(message, fields)
}

/// Derived logger from the global one.
///
/// ```no_run
/// use svclog::field;
///
/// let log = svclog::with([field::string("component", "auth")]);
/// log.info("authentication service started", []);
/// ```
#[track_caller]
pub fn with(fields: impl IntoIterator<Item = Field>) -> Logger {
    get().with(fields)
}

/// Flush the global logger.
pub fn sync() -> Result<(), SyncError> {
    try_get()?.sync()
}

/// Flush the global logger, giving up after `timeout`.
pub async fn sync_with_timeout(timeout: Duration) -> Result<(), SyncError> {
    try_get()?.sync_with_timeout(timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Environment, LoggerConfig, Severity};
    use crate::error::ErrorKind;
    use crate::field;
    use crate::lifecycle::global::{init_global_with, reset_global};
    use crate::observability::sink::CaptureBuffer;
    use crate::observability::{LoggerBuilder, Output};
    use serial_test::serial;

    fn install(level: Severity) -> CaptureBuffer {
        reset_global();
        let buffer = CaptureBuffer::default();
        init_global_with(
            LoggerBuilder::new(LoggerConfig::new(level, Environment::Production, "facade"))
                .output(Output::Writer(Box::new(buffer.clone()))),
        )
        .unwrap();
        buffer
    }

    #[test]
    #[serial]
    fn test_package_level_functions() {
        let buffer = install(Severity::Debug);

        debug("debug message", [field::string("key", "value")]);
        info("info message", [field::int("count", 42)]);
        warn("warn message", [field::boolean("flag", true)]);
        error("error message", [field::error(&std::io::Error::other("test error"))]);

        let lines = buffer.json_lines();
        let levels: Vec<_> = lines.iter().map(|l| l["level"].as_str().unwrap()).collect();
        assert_eq!(levels, ["debug", "info", "warn", "error"]);
        assert_eq!(lines[1]["count"], 42);
        assert_eq!(lines[3]["error"], "test error");
        assert!(lines.iter().all(|l| l["service"] == "facade"));
        assert!(lines[0]["caller"].as_str().unwrap().starts_with("lifecycle/facade.rs:"));
        reset_global();
    }

    #[test]
    #[serial]
    fn test_with_derives_from_global() {
        let buffer = install(Severity::Info);

        let log = with([field::string("component", "auth")]);
        log.info("user authenticated", [field::string("user_id", "12345")]);
        info("plain", []);

        let lines = buffer.json_lines();
        assert_eq!(lines[0]["component"], "auth");
        assert_eq!(lines[0]["user_id"], "12345");
        assert!(lines[1].get("component").is_none());
        assert!(!Logger::ptr_eq(&log, &get()));
        reset_global();
    }

    #[test]
    #[serial]
    fn test_emission_before_init_panics() {
        reset_global();
        let result = std::panic::catch_unwind(|| info("too early", []));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_sync_before_init() {
        reset_global();
        let err = sync().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotInitialized);
    }

    #[tokio::test]
    #[serial]
    async fn test_sync_with_timeout_on_global() {
        let _buffer = install(Severity::Info);
        sync_with_timeout(Duration::from_secs(5)).await.unwrap();
        sync().unwrap();
        reset_global();
    }
}
