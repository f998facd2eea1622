//! Output encodings.
//!
//! - Production: one JSON object per line, machine-parseable, fixed key names.
//! - Development: tab-separated columns with a coloured level; any fields
//!   follow as a trailing JSON object and a stack trace goes on the next lines.

use std::io;

use serde_json::{Map, Value};

use crate::config::Environment;
use crate::observability::record::{Level, Record};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

const RESET: &str = "\x1b[0m";

/// Key names used for the record's built-in parts.
///
/// An empty key omits that part from the output, in both encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderKeys {
    pub time: &'static str,
    pub level: &'static str,
    pub caller: &'static str,
    pub message: &'static str,
    pub stacktrace: &'static str,
}

impl EncoderKeys {
    /// Schema for JSON log shipping.
    pub const fn production() -> Self {
        Self {
            time: "timestamp",
            level: "level",
            caller: "caller",
            message: "message",
            stacktrace: "stacktrace",
        }
    }

    /// Short schema for local reading.
    pub const fn development() -> Self {
        Self {
            time: "T",
            level: "L",
            caller: "C",
            message: "M",
            stacktrace: "S",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Console,
}

impl Encoding {
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Encoding::Json,
            Environment::Development => Encoding::Console,
        }
    }
}

/// Turns a [`Record`] into one output entry.
#[derive(Debug, Clone)]
pub struct Encoder {
    encoding: Encoding,
    keys: EncoderKeys,
    ansi: bool,
}

impl Encoder {
    pub fn json() -> Self {
        Self {
            encoding: Encoding::Json,
            keys: EncoderKeys::production(),
            ansi: false,
        }
    }

    pub fn console(ansi: bool) -> Self {
        Self {
            encoding: Encoding::Console,
            keys: EncoderKeys::development(),
            ansi,
        }
    }

    /// JSON in production, console in development. `ansi` only affects console output.
    pub fn for_environment(environment: Environment, ansi: bool) -> Self {
        match Encoding::for_environment(environment) {
            Encoding::Json => Self::json(),
            Encoding::Console => Self::console(ansi),
        }
    }

    /// Replace the key schema, e.g. to omit the caller column.
    pub fn with_keys(mut self, keys: EncoderKeys) -> Self {
        self.keys = keys;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn keys(&self) -> &EncoderKeys {
        &self.keys
    }

    /// Append the encoded record, newline-terminated, to `buf`.
    pub fn encode(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()> {
        match self.encoding {
            Encoding::Json => self.encode_json(record, buf),
            Encoding::Console => self.encode_console(record, buf),
        }
    }

    fn encode_json(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()> {
        let keys = &self.keys;
        let mut entry = Map::with_capacity(record.fields.len() + 5);

        if !keys.time.is_empty() {
            entry.insert(keys.time.into(), record.time.format(TIME_FORMAT).to_string().into());
        }
        if !keys.level.is_empty() {
            entry.insert(keys.level.into(), record.level.as_lowercase().into());
        }
        if let Some(caller) = record.caller.filter(|_| !keys.caller.is_empty()) {
            entry.insert(keys.caller.into(), caller.short().into());
        }
        if !keys.message.is_empty() {
            entry.insert(keys.message.into(), record.message.clone().into());
        }

        // built-in keys win over fields of the same name
        for (key, value) in &record.fields {
            if !entry.contains_key(key) {
                entry.insert(key.clone(), value.clone());
            }
        }

        if let Some(stacktrace) = record.stacktrace.as_ref().filter(|_| !keys.stacktrace.is_empty()) {
            entry.insert(keys.stacktrace.into(), Value::String(stacktrace.clone()));
        }

        serde_json::to_writer(&mut *buf, &entry)?;
        buf.push(b'\n');
        Ok(())
    }

    fn encode_console(&self, record: &Record, buf: &mut Vec<u8>) -> io::Result<()> {
        let keys = &self.keys;
        let mut columns: Vec<String> = Vec::with_capacity(5);

        if !keys.time.is_empty() {
            columns.push(record.time.format(TIME_FORMAT).to_string());
        }
        if !keys.level.is_empty() {
            columns.push(if self.ansi {
                format!("{}{}{RESET}", level_color(record.level), record.level.as_str())
            } else {
                record.level.as_str().to_owned()
            });
        }
        if let Some(caller) = record.caller.filter(|_| !keys.caller.is_empty()) {
            columns.push(caller.short());
        }
        if !keys.message.is_empty() {
            columns.push(record.message.clone());
        }
        if !record.fields.is_empty() {
            columns.push(serde_json::to_string(&record.fields)?);
        }

        let mut line = columns.join("\t");
        line.push('\n');

        if let Some(stacktrace) = record.stacktrace.as_ref().filter(|_| !keys.stacktrace.is_empty()) {
            line.push_str(stacktrace);
            if !stacktrace.ends_with('\n') {
                line.push('\n');
            }
        }

        buf.extend_from_slice(line.as_bytes());
        Ok(())
    }
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Debug => "\x1b[35m",
        Level::Info => "\x1b[34m",
        Level::Warn => "\x1b[33m",
        Level::Error | Level::Fatal => "\x1b[31m",
    }
}
