//! Flushing buffered output.
//!
//! Flushing a console descriptor fails on some platforms for reasons that
//! say nothing about lost data (the descriptor is a terminal, or does not
//! support syncing). Those causes are swallowed; anything else is reported
//! as [`SyncError::Failed`].
//!
//! The timed variant races the flush against a timer. The flush runs on its
//! own thread and is abandoned, not cancelled, if the timer wins: sinks
//! offer no way to interrupt a write in progress.

use std::io;
use std::thread;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::SyncError;
use crate::observability::logger::Logger;

/// Whether a flush failure is one of the benign console-descriptor causes.
pub fn is_ignorable(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(code) if code == libc::EINVAL || code == libc::ENOTTY || code == libc::EBADF
    )
}

impl Logger {
    /// Flush every sink.
    ///
    /// A failing sink does not stop the others from being flushed; the first
    /// failure is returned once all of them have been tried.
    pub fn sync(&self) -> Result<(), SyncError> {
        let mut first_failure = None;
        for sink in self.sinks() {
            let Err(err) = sink.flush() else { continue };
            if is_ignorable(&err) {
                tracing::trace!(error = %err, "Ignoring benign flush error");
            } else if first_failure.is_none() {
                first_failure = Some(err);
            } else {
                tracing::debug!(error = %err, "Additional flush failure");
            }
        }
        match first_failure {
            Some(err) => Err(SyncError::Failed(err)),
            None => Ok(()),
        }
    }

    /// [`sync`](Self::sync), giving up after `timeout`.
    ///
    /// On timeout the flush keeps running in the background and its result
    /// is dropped.
    pub async fn sync_with_timeout(&self, timeout: Duration) -> Result<(), SyncError> {
        let (tx, rx) = oneshot::channel();
        let logger = self.clone();

        thread::Builder::new()
            .name("svclog-flush".into())
            .spawn(move || {
                let _ = tx.send(logger.sync());
            })
            .map_err(SyncError::Failed)?;

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(SyncError::Failed(io::Error::other(
                "flush thread exited without reporting",
            ))),
            Err(_) => Err(SyncError::TimedOut(timeout)),
        }
    }
}
