//! Configuration validation.
//!
//! # Responsibilities
//! - Check raw values against the closed sets (no case folding here)
//! - Reject blank service names
//! - Report the first failing field, in the order level, environment, name
//!
//! # Design Decisions
//! - Normalization belongs to the environment loader; this layer is strict
//! - Validation is a pure function with no side effects
//! - Runs before any logger is constructed

use crate::config::schema::{Environment, LoggerConfig, Severity};
use crate::error::{ConfigError, ValueError};

/// Build a [`LoggerConfig`] from raw strings, short-circuiting on the first failure.
pub fn parse_config(
    level: &str,
    environment: &str,
    service_name: &str,
) -> Result<LoggerConfig, ConfigError> {
    let level = Severity::validate(level).map_err(ConfigError::InvalidLogLevel)?;
    let environment = Environment::validate(environment).map_err(ConfigError::InvalidEnvironment)?;
    validate_service_name(service_name)?;

    Ok(LoggerConfig::new(level, environment, service_name))
}

/// Validate an already-typed configuration.
pub fn validate_config(config: &LoggerConfig) -> Result<(), ConfigError> {
    // level and environment cannot hold values outside their sets
    validate_service_name(config.service_name())
}

pub fn validate_service_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::MissingServiceName(ValueError::Blank));
    }
    Ok(())
}
