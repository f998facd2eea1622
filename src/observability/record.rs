//! Log records and emission levels.

use std::fmt;
use std::panic::Location;

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::config::Severity;

/// Level of a single emission. `Fatal` sits above every configurable threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    pub fn as_lowercase(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => Level::Debug,
            Severity::Info => Level::Info,
            Severity::Warn => Level::Warn,
            Severity::Error => Level::Error,
        }
    }
}

impl From<&tracing::Level> for Level {
    fn from(level: &tracing::Level) -> Self {
        match *level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Source location that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    file: &'static str,
    line: u32,
}

impl Caller {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }

    pub fn file(&self) -> &'static str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// `dir/file.rs:line`, keeping only the last directory.
    pub fn short(&self) -> String {
        const SEPARATORS: &[char] = &['/', '\\'];

        let file = self.file;
        let start = file
            .rfind(SEPARATORS)
            .and_then(|last| file[..last].rfind(SEPARATORS))
            .map(|prev| prev + 1)
            .unwrap_or(0);
        format!("{}:{}", &file[start..], self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short())
    }
}

/// A fully assembled emission, handed to every sink.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub caller: Option<Caller>,
    /// Logger fields first, then call-site fields.
    pub fields: Map<String, Value>,
    pub stacktrace: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::from(Severity::Error) < Level::Fatal);
    }

    #[test]
    fn test_tracing_level_mapping() {
        assert_eq!(Level::from(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(Level::from(&tracing::Level::WARN), Level::Warn);
    }

    #[test]
    fn test_caller_short() {
        assert_eq!(Caller::new("src/observability/logger.rs", 42).short(), "observability/logger.rs:42");
        assert_eq!(Caller::new("main.rs", 7).short(), "main.rs:7");
        assert_eq!(Caller::new("src/main.rs", 7).short(), "src/main.rs:7");
        assert_eq!(Caller::new("C:\\app\\src\\lib.rs", 1).short(), "src\\lib.rs:1");
    }

    #[test]
    fn test_caller_from_location() {
        let caller = Caller::from_location(Location::caller());
        assert!(caller.file().ends_with("record.rs"));
        assert!(caller.line() > 0);
    }
}
