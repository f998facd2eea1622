//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ .env outside production)
//!     → loader.rs (read LOG_LEVEL / APP_ENV / APP_NAME, normalize case)
//!     → validation.rs (strict checks: level → environment → name)
//!     → LoggerConfig (validated, immutable)
//!     → handed to logger construction
//! ```
//!
//! # Design Decisions
//! - Every variable is required; there are no silent defaults
//! - Case normalization happens at ingestion, validation is exact-match
//! - The production check reads the raw `APP_ENV` before any file is loaded

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    env_or, from_environment, must_from_environment, require_env, DotenvFile, EnvFile,
    EnvFileVars, EnvSource, Loader, NoEnvFile, ProcessEnv, APP_ENV_VAR, APP_NAME_VAR,
    LOG_LEVEL_VAR,
};
pub use schema::{Environment, LoggerConfig, Severity};
