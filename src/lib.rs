//! Structured logging for services.
//!
//! # Architecture Overview
//!
//! ```text
//!   LOG_LEVEL / APP_ENV / APP_NAME (+ .env outside production)
//!        │
//!        ▼
//!   ┌──────────┐    ┌──────────────────────────────────────────────┐
//!   │  config  │───▶│                observability                  │
//!   │ loader + │    │  Logger ──▶ Record ──▶ Sink(s) ──▶ Encoder    │
//!   │validation│    │    │                      │      JSON/console │
//!   └──────────┘    │    └── with/tee           └── stdout/file/... │
//!        │          │  BridgeLayer: tracing events ──▶ Logger       │
//!        ▼          └──────────────────────────────────────────────┘
//!   ┌──────────────────────────────┐          ▲
//!   │          lifecycle           │──────────┘
//!   │ init_global / get / facade   │
//!   └──────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use svclog::field;
//!
//! svclog::must_init_from_environment();
//! svclog::info("server started", [field::int("port", 8080)]);
//!
//! let log = svclog::with([field::string("component", "auth")]);
//! log.warn("token expiring", [field::string("user_id", "12345")]);
//!
//! let _ = svclog::sync();
//! ```

// Configuration
pub mod config;

// Logging engine
pub mod observability;

// Process-wide logger
pub mod lifecycle;

pub mod error;

pub use observability::field;

pub use config::{from_environment, must_from_environment, Environment, LoggerConfig, Severity};
pub use error::{
    BuildError, ConfigError, ErrorKind, InitError, LoadError, NotInitialized, SyncError,
    ValueError,
};
pub use lifecycle::{
    debug, error, fatal, get, info, init_from_environment, init_global, init_global_with,
    is_initialized, must_init_from_environment, replace_global, sync, sync_with_timeout, try_get,
    warn, with,
};
pub use observability::{
    install_tracing_bridge, BridgeLayer, Field, Level, Logger, LoggerBuilder, Output, Sink,
};
