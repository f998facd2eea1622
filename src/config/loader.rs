//! Configuration loading from the process environment.
//!
//! Three variables are required, with no defaults:
//!
//! | Variable    | Accepted (case-insensitive)   | Normalized to |
//! |-------------|-------------------------------|---------------|
//! | `LOG_LEVEL` | DEBUG, INFO, WARN, ERROR      | uppercase     |
//! | `APP_ENV`   | development, production       | lowercase     |
//! | `APP_NAME`  | any non-blank string          | unchanged     |
//!
//! Outside production a local `.env` file may supplement the environment.
//! Whether we are in production is decided from the raw `APP_ENV` value
//! before the file is read, so a checked-in file can never override a
//! production deployment.

use std::collections::HashMap;
use std::env::{self, VarError};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::schema::{Environment, LoggerConfig};
use crate::error::LoadError;

pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";
pub const APP_ENV_VAR: &str = "APP_ENV";
pub const APP_NAME_VAR: &str = "APP_NAME";

pub const DEFAULT_ENV_FILE: &str = ".env";

/// Source of environment variables.
pub trait EnvSource {
    /// Value of `key`, or `None` when unset.
    fn var(&self, key: &str) -> Option<String>;

    /// Like [`var`](Self::var), but reports a value that is set yet unusable
    /// instead of treating it as unset.
    fn lookup(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.var(key))
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, LoadError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(LoadError::NotUnicode {
                name: key.to_string(),
            }),
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, LoadError> {
        (**self).lookup(key)
    }
}

/// Entries read from an env file.
pub type EnvFileVars = HashMap<String, String>;

/// A local file that supplements the environment.
pub trait EnvFile {
    /// Read the file and return its entries. A missing file yields none.
    ///
    /// The [`Loader`] consults these entries for any variable its
    /// [`EnvSource`] does not define, whatever that source is.
    fn load(&self) -> Result<EnvFileVars, LoadError>;
}

impl<T: EnvFile + ?Sized> EnvFile for &T {
    fn load(&self) -> Result<EnvFileVars, LoadError> {
        (**self).load()
    }
}

/// `.env` file backed by `dotenvy`.
///
/// Besides returning its entries, loading exports them into the process
/// environment, so later reads through [`require_env`] or `std::env` see
/// them too. Variables already set are never overridden.
#[derive(Debug, Clone)]
pub struct DotenvFile {
    path: PathBuf,
}

impl DotenvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, source: dotenvy::Error) -> LoadError {
        LoadError::EnvFile {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for DotenvFile {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl EnvFile for DotenvFile {
    fn load(&self) -> Result<EnvFileVars, LoadError> {
        let entries = match dotenvy::from_path_iter(&self.path) {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                tracing::trace!(path = %self.path.display(), "No env file, using process environment");
                return Ok(EnvFileVars::new());
            }
            Err(source) => return Err(self.error(source)),
        };

        let mut vars = EnvFileVars::new();
        for entry in entries {
            let (key, value) = entry.map_err(|source| self.error(source))?;
            if env::var_os(&key).is_none() {
                env::set_var(&key, &value);
            }
            vars.insert(key, value);
        }

        tracing::debug!(path = %self.path.display(), entries = vars.len(), "Loaded env file");
        Ok(vars)
    }
}

/// Skips file supplementation entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnvFile;

impl EnvFile for NoEnvFile {
    fn load(&self) -> Result<EnvFileVars, LoadError> {
        Ok(EnvFileVars::new())
    }
}

/// Env source with file entries underneath it.
struct Layered<'a, E> {
    env: &'a E,
    file: &'a EnvFileVars,
}

impl<E: EnvSource> EnvSource for Layered<'_, E> {
    fn var(&self, key: &str) -> Option<String> {
        self.env.var(key).or_else(|| self.file.get(key).cloned())
    }

    fn lookup(&self, key: &str) -> Result<Option<String>, LoadError> {
        match self.env.lookup(key)? {
            Some(value) => Ok(Some(value)),
            None => Ok(self.file.get(key).cloned()),
        }
    }
}

/// Reads a [`LoggerConfig`] from an environment source.
#[derive(Debug, Clone)]
pub struct Loader<E, F> {
    env: E,
    file: F,
}

impl<E: EnvSource, F: EnvFile> Loader<E, F> {
    pub fn new(env: E, file: F) -> Self {
        Self { env, file }
    }

    /// Load, normalize and validate the logger configuration.
    pub fn load(&self) -> Result<LoggerConfig, LoadError> {
        let file = self.load_env_file()?;
        let source = Layered {
            env: &self.env,
            file: &file,
        };

        let level = require_var(&source, LOG_LEVEL_VAR)?.to_uppercase();
        let environment = require_var(&source, APP_ENV_VAR)?.to_lowercase();
        let service_name = require_var(&source, APP_NAME_VAR)?;

        LoggerConfig::parse(&level, &environment, &service_name).map_err(LoadError::Config)
    }

    /// Value of a required variable from the env source alone; unset and
    /// empty are both missing.
    pub fn require(&self, key: &str) -> Result<String, LoadError> {
        require_var(&self.env, key)
    }

    fn load_env_file(&self) -> Result<EnvFileVars, LoadError> {
        let raw = self.env.var(APP_ENV_VAR).unwrap_or_default();
        if raw.eq_ignore_ascii_case(Environment::Production.as_str()) {
            tracing::trace!("Production environment, env file skipped");
            return Ok(EnvFileVars::new());
        }
        self.file.load()
    }
}

fn require_var(source: &impl EnvSource, key: &str) -> Result<String, LoadError> {
    match source.lookup(key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(LoadError::MissingRequiredEnvVar {
            name: key.to_string(),
        }),
    }
}

/// Load the logger configuration from the process environment, consulting
/// `./.env` outside production.
pub fn from_environment() -> Result<LoggerConfig, LoadError> {
    Loader::new(ProcessEnv, DotenvFile::default()).load()
}

/// Like [`from_environment`], but panics with the underlying error.
///
/// Meant for `main()` where a bad configuration should stop startup.
pub fn must_from_environment() -> LoggerConfig {
    match from_environment() {
        Ok(config) => config,
        Err(err) => panic!("failed to load configuration from environment: {err}"),
    }
}

/// Value of a required process environment variable.
pub fn require_env(key: &str) -> Result<String, LoadError> {
    Loader::new(ProcessEnv, NoEnvFile).require(key)
}

/// Value of an optional process environment variable, or `default`.
pub fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}
