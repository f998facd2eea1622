//! Observability subsystem: the logger and everything it writes through.
//!
//! # Data Flow
//! ```text
//! call site (info/with/...) or tracing event (bridge.rs)
//!     → logger.rs (threshold check, caller, attached + call-site fields)
//!     → record.rs (Record: time, level, caller, message, fields, stack trace)
//!     → sink.rs (one or more sinks, each with an encoder)
//!     → encoder.rs (JSON in production, coloured console in development)
//!     → stdout / stderr / file / writer
//!
//! flush.rs: sync() over every sink, optional timeout race
//! ```
//!
//! # Design Decisions
//! - Construction is pure; installing a logger globally lives in `lifecycle`
//! - Derived loggers share the core (threshold, sinks) and own their fields
//! - Stack traces are captured at ERROR and above

pub mod bridge;
pub mod encoder;
pub mod field;
pub mod flush;
pub mod logger;
pub mod record;
pub mod sink;

pub use bridge::{install_tracing_bridge, BridgeLayer};
pub use encoder::{Encoder, EncoderKeys, Encoding};
pub use field::Field;
pub use flush::is_ignorable;
pub use logger::{Logger, LoggerBuilder};
pub use record::{Caller, Level, Record};
pub use sink::{Output, Sink, WriterSink};
