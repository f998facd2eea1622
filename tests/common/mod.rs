//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::env;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

pub const LOGGER_VARS: [&str; 3] = ["LOG_LEVEL", "APP_ENV", "APP_NAME"];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Scoped process-environment mutation, restored on drop.
///
/// The logger variables are cleared on creation so a developer's shell
/// cannot leak into a test.
pub struct EnvGuard {
    entries: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn new() -> Self {
        let mut guard = Self {
            entries: Vec::new(),
            _lock: env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
        };
        for key in LOGGER_VARS {
            guard.remove(key);
        }
        guard
    }

    fn remember(&mut self, key: &'static str) {
        if self.entries.iter().all(|(existing, _)| *existing != key) {
            self.entries.push((key, env::var_os(key)));
        }
    }

    pub fn set(&mut self, key: &'static str, value: impl AsRef<OsStr>) {
        self.remember(key);
        env::set_var(key, value);
    }

    pub fn remove(&mut self, key: &'static str) {
        self.remember(key);
        env::remove_var(key);
    }

    pub fn set_logger_vars(&mut self, level: &str, environment: &str, name: &str) {
        self.set("LOG_LEVEL", level);
        self.set("APP_ENV", environment);
        self.set("APP_NAME", name);
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, previous) in self.entries.drain(..).rev() {
            match previous {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

/// In-memory log destination shared with the test body.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.contents()
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
