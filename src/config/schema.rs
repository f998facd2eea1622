//! Configuration schema definitions.
//!
//! This module defines the logger configuration value and its two closed
//! enumerations. All types derive Serde traits; the enumerations deserialize
//! only from their canonical string forms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::validation;
use crate::error::{ConfigError, ValueError};

/// Minimum severity a logger emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Severity {
    /// Debug and above.
    Debug,
    /// Informational and above.
    Info,
    /// Warnings and above.
    Warn,
    /// Errors only.
    Error,
}

impl Severity {
    /// Canonical string forms, in ascending order.
    pub const ACCEPTED: &'static [&'static str] = &["DEBUG", "INFO", "WARN", "ERROR"];

    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Accepts exactly one of the canonical uppercase forms.
    ///
    /// No case folding happens here; the environment loader normalizes
    /// before calling this.
    pub fn validate(raw: &str) -> Result<Self, ValueError> {
        match raw {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            _ => Err(ValueError::NotAccepted {
                value: raw.to_string(),
                accepted: Self::ACCEPTED,
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl TryFrom<String> for Severity {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, ValueError> {
        Self::validate(&value)
    }
}

impl From<Severity> for &'static str {
    fn from(level: Severity) -> Self {
        level.as_str()
    }
}

/// Deployment environment; selects the output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const ACCEPTED: &'static [&'static str] = &["development", "production"];

    /// Accepts exactly one of the canonical lowercase forms.
    pub fn validate(raw: &str) -> Result<Self, ValueError> {
        match raw {
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            _ => Err(ValueError::NotAccepted {
                value: raw.to_string(),
                accepted: Self::ACCEPTED,
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)
    }
}

impl TryFrom<String> for Environment {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, ValueError> {
        Self::validate(&value)
    }
}

impl From<Environment> for &'static str {
    fn from(env: Environment) -> Self {
        env.as_str()
    }
}

/// Configuration for one logger.
///
/// Immutable once built: a different configuration is a new value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggerConfig {
    level: Severity,
    environment: Environment,
    service_name: String,
}

impl LoggerConfig {
    /// Build from typed parts. The service name is checked by [`validate`](Self::validate).
    pub fn new(level: Severity, environment: Environment, service_name: impl Into<String>) -> Self {
        Self {
            level,
            environment,
            service_name: service_name.into(),
        }
    }

    /// Colourised console output at `INFO`.
    pub fn development(service_name: impl Into<String>) -> Self {
        Self::new(Severity::Info, Environment::Development, service_name)
    }

    /// JSON output at `INFO`.
    pub fn production(service_name: impl Into<String>) -> Self {
        Self::new(Severity::Info, Environment::Production, service_name)
    }

    /// Build from raw canonical strings, reporting the first failing field.
    pub fn parse(level: &str, environment: &str, service_name: &str) -> Result<Self, ConfigError> {
        validation::parse_config(level, environment, service_name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validation::validate_config(self)
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
