//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the logger configuration from the environment
//! - Validate it and install the global logger in one step
//!
//! # Design Decisions
//! - Fail fast: the `must_*` variants panic with the underlying cause
//! - Loader errors keep their chain when wrapped, so callers can still ask
//!   which variable was missing or which value was rejected

use crate::config::loader;
use crate::error::InitError;
use crate::lifecycle::global::init_global;

/// Load the configuration from the environment and install the global logger.
///
/// Required variables: `LOG_LEVEL`, `APP_ENV`, `APP_NAME`.
///
/// ```no_run
/// if let Err(err) = svclog::init_from_environment() {
///     eprintln!("failed to initialize logger: {err}");
///     std::process::exit(1);
/// }
/// svclog::info("application started", []);
/// ```
pub fn init_from_environment() -> Result<(), InitError> {
    let config = loader::from_environment().map_err(InitError::Load)?;
    init_global(&config)
}

/// Like [`init_from_environment`], but panics with the underlying error.
pub fn must_init_from_environment() {
    if let Err(err) = init_from_environment() {
        panic!("failed to initialize logger from environment: {err}");
    }
}
