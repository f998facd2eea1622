//! The logger handle.
//!
//! A [`Logger`] is a cheap, clonable reference to a shared core (threshold
//! and sinks) plus its own immutable set of attached fields. Deriving with
//! [`Logger::with`] builds a new handle over the same core; the parent is
//! never touched.

use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use chrono::Local;
use serde_json::{Map, Value};

use crate::config::LoggerConfig;
use crate::error::BuildError;
use crate::observability::encoder::Encoder;
use crate::observability::field::{self, Field};
use crate::observability::record::{Caller, Level, Record};
use crate::observability::sink::{Output, Sink, WriterSink};

/// Field carrying the service name on every record.
pub const SERVICE_KEY: &str = "service";
/// Field carrying the deployment environment on every record.
pub const ENVIRONMENT_KEY: &str = "environment";

struct Core {
    threshold: Level,
    stacktrace_level: Level,
    sinks: Vec<Arc<dyn Sink>>,
}

struct Inner {
    core: Arc<Core>,
    fields: Map<String, Value>,
}

/// Structured, leveled logger.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.inner.core.threshold)
            .field("sinks", &self.inner.core.sinks.len())
            .field("fields", &self.inner.fields)
            .finish()
    }
}

/// Builds a [`Logger`] from a [`LoggerConfig`].
///
/// Defaults: stdout, ANSI colour on for console output, no extra sinks.
pub struct LoggerBuilder {
    config: LoggerConfig,
    output: Output,
    ansi: bool,
    extra_sinks: Vec<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            config,
            output: Output::Stdout,
            ansi: true,
            extra_sinks: Vec::new(),
        }
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    /// Colourise levels in console output.
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Also write every record to `sink`.
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.extra_sinks.push(sink);
        self
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    pub fn build(self) -> Result<Logger, BuildError> {
        self.config.validate().map_err(BuildError::InvalidConfig)?;

        let encoder = Encoder::for_environment(self.config.environment(), self.ansi);
        let primary = WriterSink::new(encoder, self.output)?;

        let mut sinks: Vec<Arc<dyn Sink>> = Vec::with_capacity(1 + self.extra_sinks.len());
        sinks.push(Arc::new(primary));
        sinks.extend(self.extra_sinks);

        let core = Core {
            threshold: Level::from(self.config.level()),
            stacktrace_level: Level::Error,
            sinks,
        };

        let mut fields = Map::new();
        fields.insert(SERVICE_KEY.into(), self.config.service_name().into());
        fields.insert(ENVIRONMENT_KEY.into(), self.config.environment().as_str().into());

        Ok(Logger {
            inner: Arc::new(Inner {
                core: Arc::new(core),
                fields,
            }),
        })
    }
}

impl Logger {
    /// Logger for `config`, writing to stdout.
    ///
    /// Pure construction: nothing global is touched.
    pub fn new(config: &LoggerConfig) -> Result<Self, BuildError> {
        LoggerBuilder::new(config.clone()).build()
    }

    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder::new(config)
    }

    /// Derived logger with `fields` added on top of the ones already attached.
    ///
    /// ```
    /// use svclog::{field, Logger, LoggerConfig};
    ///
    /// let log = Logger::new(&LoggerConfig::development("auth")).unwrap();
    /// let request = log.with([field::string("request_id", "req-123")]);
    /// assert!(!Logger::ptr_eq(&log, &request));
    /// ```
    pub fn with(&self, fields: impl IntoIterator<Item = Field>) -> Logger {
        let mut merged = self.inner.fields.clone();
        field::merge(&mut merged, fields);
        Logger {
            inner: Arc::new(Inner {
                core: Arc::clone(&self.inner.core),
                fields: merged,
            }),
        }
    }

    /// Logger writing to every current sink plus `sink`. Attached fields carry over.
    pub fn tee(&self, sink: Arc<dyn Sink>) -> Logger {
        let core = &self.inner.core;
        let mut sinks = core.sinks.clone();
        sinks.push(sink);

        Logger {
            inner: Arc::new(Inner {
                core: Arc::new(Core {
                    threshold: core.threshold,
                    stacktrace_level: core.stacktrace_level,
                    sinks,
                }),
                fields: self.inner.fields.clone(),
            }),
        }
    }

    /// Whether a record at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.inner.core.threshold
    }

    pub fn threshold(&self) -> Level {
        self.inner.core.threshold
    }

    /// Fields attached to every record from this logger.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.inner.fields
    }

    /// Same handle instance, not merely equal configuration.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    #[track_caller]
    pub fn debug(&self, message: &str, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Debug, message, fields);
    }

    #[track_caller]
    pub fn info(&self, message: &str, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Info, message, fields);
    }

    #[track_caller]
    pub fn warn(&self, message: &str, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Warn, message, fields);
    }

    #[track_caller]
    pub fn error(&self, message: &str, fields: impl IntoIterator<Item = Field>) {
        self.log(Level::Error, message, fields);
    }

    /// Log at `FATAL`, flush, and terminate the process with status 1.
    ///
    /// Only for unrecoverable startup failures; nothing after this call runs.
    #[track_caller]
    pub fn fatal(&self, message: &str, fields: impl IntoIterator<Item = Field>) -> ! {
        self.log(Level::Fatal, message, fields);
        let _ = self.sync();
        std::process::exit(1)
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: &str, fields: impl IntoIterator<Item = Field>) {
        if !self.enabled(level) {
            return;
        }
        let caller = Caller::from_location(Location::caller());
        self.emit(level, message.to_owned(), Some(caller), fields);
    }

    pub(crate) fn emit(
        &self,
        level: Level,
        message: String,
        caller: Option<Caller>,
        fields: impl IntoIterator<Item = Field>,
    ) {
        let mut merged = self.inner.fields.clone();
        field::merge(&mut merged, fields);

        let stacktrace = (level >= self.inner.core.stacktrace_level)
            .then(|| Backtrace::force_capture().to_string());

        let record = Record {
            time: Local::now(),
            level,
            message,
            caller,
            fields: merged,
            stacktrace,
        };

        for sink in &self.inner.core.sinks {
            if let Err(err) = sink.write_record(&record) {
                // not through tracing: the bridge may route back into this sink
                eprintln!("svclog: failed to write log record: {err}");
            }
        }
    }

    pub(crate) fn sinks(&self) -> &[Arc<dyn Sink>] {
        &self.inner.core.sinks
    }
}
