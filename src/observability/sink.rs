//! Output sinks.
//!
//! A [`Sink`] receives every record a logger emits and owns its own
//! encoding and destination. A logger writes to one or more sinks; adding a
//! sink (see [`Logger::tee`](crate::Logger::tee)) is how extra export
//! targets are attached.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use parking_lot::Mutex;

use crate::error::BuildError;
use crate::observability::encoder::Encoder;
use crate::observability::record::Record;

/// Destination for encoded records.
pub trait Sink: Send + Sync {
    fn write_record(&self, record: &Record) -> io::Result<()>;

    /// Flush anything buffered to the underlying device.
    fn flush(&self) -> io::Result<()>;
}

/// Where a [`WriterSink`] sends its bytes.
#[derive(Default)]
pub enum Output {
    #[default]
    Stdout,
    Stderr,
    /// Appended to, created if missing.
    File(PathBuf),
    Writer(Box<dyn Write + Send>),
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => f.write_str("Stdout"),
            Output::Stderr => f.write_str("Stderr"),
            Output::File(path) => f.debug_tuple("File").field(path).finish(),
            Output::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

enum Target {
    Stdout(io::Stdout),
    Stderr(io::Stderr),
    File(File),
    Writer(Box<dyn Write + Send>),
}

impl Target {
    fn open(output: Output) -> Result<Self, BuildError> {
        Ok(match output {
            Output::Stdout => Target::Stdout(io::stdout()),
            Output::Stderr => Target::Stderr(io::stderr()),
            Output::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|source| BuildError::Open { path, source })?;
                Target::File(file)
            }
            Output::Writer(writer) => Target::Writer(writer),
        })
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Target::Stdout(out) => out.write_all(buf),
            Target::Stderr(out) => out.write_all(buf),
            Target::File(file) => file.write_all(buf),
            Target::Writer(writer) => writer.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Target::Stdout(out) => out.flush(),
            Target::Stderr(out) => out.flush(),
            Target::File(file) => {
                file.flush()?;
                file.sync_all()
            }
            Target::Writer(writer) => writer.flush(),
        }
    }
}

/// Encodes records and writes them to an [`Output`].
pub struct WriterSink {
    encoder: Encoder,
    target: Mutex<Target>,
}

impl WriterSink {
    pub fn new(encoder: Encoder, output: Output) -> Result<Self, BuildError> {
        Ok(Self {
            encoder,
            target: Mutex::new(Target::open(output)?),
        })
    }

    pub fn encoder(&self) -> &Encoder {
        &self.encoder
    }
}

impl fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("encoder", &self.encoder)
            .finish_non_exhaustive()
    }
}

impl Sink for WriterSink {
    fn write_record(&self, record: &Record) -> io::Result<()> {
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(record, &mut buf)?;
        self.target.lock().write_all(&buf)
    }

    fn flush(&self) -> io::Result<()> {
        self.target.lock().flush()
    }
}

/// In-memory writer shared between a sink and a test.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CaptureBuffer(std::sync::Arc<Mutex<Vec<u8>>>);

#[cfg(test)]
impl CaptureBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub(crate) fn json_lines(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }
}

#[cfg(test)]
impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
