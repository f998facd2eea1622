//! Process-wide logger singleton.
//!
//! # States
//! - Uninitialized: no logger installed (process start)
//! - Initialized: a logger is installed and returned by [`get`] / [`try_get`]
//!
//! # State Transitions
//! ```text
//! Uninitialized → Initialized: init_global succeeds (exactly once)
//! Initialized → Initialized:   replace_global (startup-time override only)
//! ```
//!
//! The write lock is held across check, validate, build and store, so
//! concurrent `init_global` calls produce exactly one success.

use parking_lot::{const_rwlock, RwLock};

use crate::config::LoggerConfig;
use crate::error::{InitError, NotInitialized};
use crate::observability::{Logger, LoggerBuilder};

static GLOBAL: RwLock<Option<Logger>> = const_rwlock(None);

/// Build a logger for `config` and install it as the global logger.
///
/// Fails with [`InitError::AlreadyInitialized`] if one is already installed;
/// the installed logger is left untouched.
pub fn init_global(config: &LoggerConfig) -> Result<(), InitError> {
    init_global_with(LoggerBuilder::new(config.clone()))
}

/// [`init_global`] with a customised builder (output, colour, extra sinks).
pub fn init_global_with(builder: LoggerBuilder) -> Result<(), InitError> {
    let mut slot = GLOBAL.write();
    if slot.is_some() {
        return Err(InitError::AlreadyInitialized);
    }

    let config = builder.config().clone();
    config.validate().map_err(InitError::InvalidConfig)?;
    let logger = builder.build().map_err(InitError::Build)?;

    *slot = Some(logger);
    drop(slot);

    tracing::debug!(
        service = config.service_name(),
        environment = %config.environment(),
        level = %config.level(),
        "Global logger initialized"
    );
    Ok(())
}

/// The global logger.
///
/// # Panics
///
/// Panics if no logger has been installed. Use [`try_get`] where aborting
/// is not acceptable.
#[track_caller]
pub fn get() -> Logger {
    match try_get() {
        Ok(logger) => logger,
        Err(err) => panic!("{err}"),
    }
}

/// The global logger, or [`NotInitialized`].
pub fn try_get() -> Result<Logger, NotInitialized> {
    GLOBAL.read().clone().ok_or(NotInitialized)
}

pub fn is_initialized() -> bool {
    GLOBAL.read().is_some()
}

/// Overwrite the global logger unconditionally.
///
/// Startup only: this bypasses the at-most-once rule, typically to install
/// `get().tee(sink)` once an export sink is ready. Callers that resolved the
/// previous logger keep using it; there is no ordering with in-flight
/// emissions beyond the lock itself.
pub fn replace_global(logger: Logger) {
    let previous = GLOBAL.write().replace(logger);
    tracing::debug!(had_previous = previous.is_some(), "Global logger replaced");
}

#[cfg(test)]
pub(crate) fn reset_global() {
    GLOBAL.write().take();
}
