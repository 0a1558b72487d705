//! Progress-bar-aware logging
//!
//! While a copy progress bar is on screen, log lines have to be printed
//! through the bar so they land above it instead of tearing the display.
//! This module provides a `MakeWriter` for the fmt layer that does that.

use indicatif::ProgressBar;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Bar currently drawing on stderr, if any
static ACTIVE_PROGRESS: Mutex<Option<ProgressBar>> = Mutex::new(None);

/// Register (or clear) the bar that log output must suspend
pub fn set_active_progress(bar: Option<ProgressBar>) {
    if let Ok(mut slot) = ACTIVE_PROGRESS.lock() {
        *slot = bar;
    }
}

fn active_progress() -> Option<ProgressBar> {
    ACTIVE_PROGRESS.lock().ok().and_then(|slot| slot.clone())
}

/// Stderr writer factory that cooperates with the active progress bar
#[derive(Debug, Default, Clone, Copy)]
pub struct ProgressAwareStderr;

impl<'a> MakeWriter<'a> for ProgressAwareStderr {
    type Writer = ProgressAwareWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressAwareWriter { buf: Vec::new() }
    }
}

/// Buffers one log event and emits it in a single write on flush or drop
pub struct ProgressAwareWriter {
    buf: Vec<u8>,
}

impl Write for ProgressAwareWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        match active_progress() {
            Some(bar) => bar.suspend(|| io::stderr().write_all(&buf)),
            None => io::stderr().write_all(&buf),
        }
    }
}

impl Drop for ProgressAwareWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
