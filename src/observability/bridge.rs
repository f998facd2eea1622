//! Forwarding `tracing` events into a [`Logger`].
//!
//! Libraries in the dependency graph log through `tracing` macros. The
//! layer here turns each of their events into a record on a logger, so one
//! service produces one stream with one schema.
//!
//! ```no_run
//! use svclog::{install_tracing_bridge, Logger, LoggerConfig};
//!
//! let log = Logger::new(&LoggerConfig::production("gateway")).unwrap();
//! install_tracing_bridge(&log).unwrap();
//! tracing::info!(port = 8080, "listening");
//! ```

use std::fmt;

use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

use crate::observability::field::{self, Field};
use crate::observability::logger::Logger;
use crate::observability::record::{Caller, Level};

/// Field naming the `tracing` target of a forwarded event.
pub const TARGET_KEY: &str = "target";

/// A `tracing_subscriber` layer writing events through a [`Logger`].
#[derive(Debug, Clone)]
pub struct BridgeLayer {
    logger: Logger,
}

impl BridgeLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for BridgeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = metadata
            .file()
            .zip(metadata.line())
            .map(|(file, line)| Caller::new(file, line));

        let mut fields = Vec::with_capacity(visitor.fields.len() + 1);
        fields.push(field::string(TARGET_KEY, metadata.target()));
        fields.extend(visitor.fields);

        self.logger
            .emit(level, visitor.message.unwrap_or_default(), caller, fields);
    }
}

#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: &TracingField, value: impl Into<serde_json::Value>) {
        self.fields.push(Field::new(field.name(), value));
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &TracingField, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            self.push(field, value);
        }
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, value);
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, value);
    }

    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, value);
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, value);
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.push(field, rendered);
        }
    }
}

impl Logger {
    /// A layer that forwards `tracing` events to this logger.
    pub fn tracing_layer(&self) -> BridgeLayer {
        BridgeLayer::new(self.clone())
    }
}

/// Make `logger` the destination of all `tracing` events in the process.
///
/// Fails if a global `tracing` subscriber is already installed.
pub fn install_tracing_bridge(logger: &Logger) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(logger.tracing_layer())
        .try_init()
}
