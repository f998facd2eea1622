//! Error taxonomy.
//!
//! Every failure the crate reports is one of the typed errors below. Wrapping
//! variants keep their cause as the error `source()`, so a caller can ask
//! whether an error is "fundamentally" a given kind no matter how many layers
//! sit on top of it:
//!
//! ```
//! use svclog::{ErrorKind, LoggerConfig};
//!
//! let err = LoggerConfig::parse("LOUD", "production", "svc").unwrap_err();
//! assert!(err.is(ErrorKind::InvalidLogLevel));
//! assert!(err.is(ErrorKind::InvalidValue));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Programmatic tag for every error the crate can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidValue,
    InvalidLogLevel,
    InvalidEnvironment,
    MissingServiceName,
    MissingRequiredEnvVar,
    EnvFile,
    InvalidConfig,
    AlreadyInitialized,
    NotInitialized,
    Build,
    Load,
    SyncFailed,
    SyncTimedOut,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidValue => "invalid value",
            ErrorKind::InvalidLogLevel => "invalid log level",
            ErrorKind::InvalidEnvironment => "invalid environment",
            ErrorKind::MissingServiceName => "missing service name",
            ErrorKind::MissingRequiredEnvVar => "missing required environment variable",
            ErrorKind::EnvFile => "env file",
            ErrorKind::InvalidConfig => "invalid configuration",
            ErrorKind::AlreadyInitialized => "already initialized",
            ErrorKind::NotInitialized => "not initialized",
            ErrorKind::Build => "build",
            ErrorKind::Load => "load",
            ErrorKind::SyncFailed => "sync failed",
            ErrorKind::SyncTimedOut => "sync timed out",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw configuration value that is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The value is not one of the canonical forms.
    #[error("invalid configuration value: expected one of [{}], got '{value}'", .accepted.join(", "))]
    NotAccepted {
        value: String,
        accepted: &'static [&'static str],
    },

    /// The value is empty or whitespace-only.
    #[error("invalid configuration value: must not be empty or whitespace-only")]
    Blank,
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidValue
    }
}

/// Shape errors in a [`LoggerConfig`](crate::LoggerConfig).
///
/// Only the first failing check is reported, in the order
/// level, environment, service name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(#[source] ValueError),

    #[error("invalid environment: {0}")]
    InvalidEnvironment(#[source] ValueError),

    #[error("service name is required: {0}")]
    MissingServiceName(#[source] ValueError),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::InvalidLogLevel(_) => ErrorKind::InvalidLogLevel,
            ConfigError::InvalidEnvironment(_) => ErrorKind::InvalidEnvironment,
            ConfigError::MissingServiceName(_) => ErrorKind::MissingServiceName,
        }
    }
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("required environment variable is not set: {name}")]
    MissingRequiredEnvVar { name: String },

    #[error("environment variable {name} is not valid unicode")]
    NotUnicode { name: String },

    #[error("error loading env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("logger configuration error: {0}")]
    Config(#[source] ConfigError),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::MissingRequiredEnvVar { .. } => ErrorKind::MissingRequiredEnvVar,
            LoadError::NotUnicode { .. } => ErrorKind::InvalidValue,
            LoadError::EnvFile { .. } => ErrorKind::EnvFile,
            LoadError::Config(_) => ErrorKind::Load,
        }
    }

    /// Name of the missing variable, if this is a missing-variable error.
    pub fn missing_var(&self) -> Option<&str> {
        match self {
            LoadError::MissingRequiredEnvVar { name } => Some(name),
            _ => None,
        }
    }
}

/// Errors raised while constructing a logger from a configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid logger configuration: {0}")]
    InvalidConfig(#[source] ConfigError),

    #[error("cannot open log output {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Build
    }
}

/// Errors raised by global initialization.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("invalid logger configuration: {0}")]
    InvalidConfig(#[source] ConfigError),

    #[error("failed to build logger: {0}")]
    Build(#[source] BuildError),

    #[error("failed to load configuration: {0}")]
    Load(#[source] LoadError),
}

impl InitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InitError::AlreadyInitialized => ErrorKind::AlreadyInitialized,
            InitError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            InitError::Build(_) => ErrorKind::Build,
            InitError::Load(_) => ErrorKind::Load,
        }
    }
}

/// No global logger has been installed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("logger not initialized: call init_global() during application startup")]
pub struct NotInitialized;

impl NotInitialized {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::NotInitialized
    }
}

/// Errors raised while flushing buffered output.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to sync logger: {0}")]
    Failed(#[source] io::Error),

    #[error("failed to sync logger: timed out after {0:?}")]
    TimedOut(Duration),

    #[error("failed to sync logger: {0}")]
    NotInitialized(#[source] NotInitialized),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Failed(_) => ErrorKind::SyncFailed,
            SyncError::TimedOut(_) => ErrorKind::SyncTimedOut,
            SyncError::NotInitialized(_) => ErrorKind::NotInitialized,
        }
    }
}

impl From<NotInitialized> for SyncError {
    fn from(err: NotInitialized) -> Self {
        SyncError::NotInitialized(err)
    }
}

/// Reports whether `err`, or anything in its `source()` chain, is of `kind`.
pub fn is_kind(err: &(dyn StdError + 'static), kind: ErrorKind) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if kind_of(err) == Some(kind) {
            return true;
        }
        current = err.source();
    }
    false
}

fn kind_of(err: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    if let Some(e) = err.downcast_ref::<ValueError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<LoadError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<BuildError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<InitError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<NotInitialized>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<SyncError>() {
        return Some(e.kind());
    }
    None
}

macro_rules! impl_chain_check {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Reports whether this error or any of its causes is of `kind`.
                pub fn is(&self, kind: ErrorKind) -> bool {
                    is_kind(self, kind)
                }
            }
        )*
    };
}

impl_chain_check!(
    ValueError,
    ConfigError,
    LoadError,
    BuildError,
    InitError,
    NotInitialized,
    SyncError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_survives_wrapping() {
        let err = InitError::Load(LoadError::Config(ConfigError::InvalidEnvironment(
            ValueError::NotAccepted {
                value: "staging".into(),
                accepted: &["development", "production"],
            },
        )));

        assert!(err.is(ErrorKind::Load));
        assert!(err.is(ErrorKind::InvalidEnvironment));
        assert!(err.is(ErrorKind::InvalidValue));
        assert!(!err.is(ErrorKind::InvalidLogLevel));
        assert!(!err.is(ErrorKind::AlreadyInitialized));
    }

    #[test]
    fn test_invalid_config_wraps_shape_error() {
        let err = InitError::InvalidConfig(ConfigError::MissingServiceName(ValueError::Blank));

        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(err.is(ErrorKind::MissingServiceName));
        assert!(err.to_string().contains("invalid logger configuration"));
    }

    #[test]
    fn test_not_initialized_through_sync_error() {
        let err = SyncError::from(NotInitialized);
        assert!(err.is(ErrorKind::NotInitialized));
        assert!(!err.is(ErrorKind::SyncFailed));
    }

    #[test]
    fn test_value_error_lists_accepted_values() {
        let err = ValueError::NotAccepted {
            value: "LOUD".into(),
            accepted: &["DEBUG", "INFO"],
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration value: expected one of [DEBUG, INFO], got 'LOUD'"
        );
    }

    #[test]
    fn test_foreign_errors_have_no_kind() {
        let err = io::Error::new(io::ErrorKind::Other, "boom");
        assert!(!is_kind(&err, ErrorKind::SyncFailed));
    }
}
