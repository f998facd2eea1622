//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config from env → Validate → Build logger → Install globally
//!
//! Global (global.rs):
//!     init_global (once) / replace_global (startup override)
//!     get (panics if missing) / try_get (returns NotInitialized)
//!
//! Facade (facade.rs):
//!     debug/info/warn/error/fatal/with/sync → get() → logger
//! ```
//!
//! # Design Decisions
//! - One reader/writer lock guards the single process-wide slot
//! - Initialization happens at most once; a second attempt is an error
//! - `get()` panics on purpose to surface missing initialization early

pub mod facade;
pub mod global;
pub mod startup;

pub use facade::{debug, error, fatal, info, sync, sync_with_timeout, warn, with};
pub use global::{get, init_global, init_global_with, is_initialized, replace_global, try_get};
pub use startup::{init_from_environment, must_init_from_environment};
