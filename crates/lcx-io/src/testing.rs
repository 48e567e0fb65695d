//! Test utilities for I/O adapters.
//!
//! - [`CaptureConsumer`]: in-memory [`OutputConsumer`] recording into an [`EventLog`]
//! - [`SharedBuffer`]: cloneable in-memory writer that counts flushes
//! - [`FailingWriter`]: writer that fails on write or flush
//! - [`FlakyWriter`]: writer whose first writes time out

use lcx_types::Order;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

use crate::{IoError, OutputConsumer};

#[derive(Debug, Default)]
struct LogState {
    events: Vec<String>,
    closes: usize,
}

/// Shared record of what capture consumers saw.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Arc<Mutex<LogState>>);

impl EventLog {
    /// Returns a copy of all recorded events, in order.
    pub fn events(&self) -> Vec<String> {
        self.0.lock().events.clone()
    }

    /// Returns how many consumers actually released their sink.
    pub fn close_count(&self) -> usize {
        self.0.lock().closes
    }

    fn push(&self, event: String) {
        self.0.lock().events.push(event);
    }

    fn closed(&self, tag: Option<&str>) {
        let mut state = self.0.lock();
        state.closes += 1;
        if let Some(tag) = tag {
            state.events.push(format!("{tag}:close"));
        }
    }
}

/// An in-memory consumer.
///
/// Untagged consumers record each output verbatim; tagged ones record
/// `"<tag>:<output>"` and `"<tag>:close"`, which makes cross-consumer
/// ordering observable.
pub struct CaptureConsumer {
    tag: Option<&'static str>,
    log: EventLog,
    order: i32,
    closed: bool,
}

impl CaptureConsumer {
    /// Creates an untagged consumer and the log it writes to.
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        let consumer = Self {
            tag: None,
            log: log.clone(),
            order: 0,
            closed: false,
        };
        (consumer, log)
    }

    /// Creates a tagged consumer writing to `log`.
    pub fn tagged(tag: &'static str, log: EventLog) -> Self {
        Self {
            tag: Some(tag),
            log,
            order: 0,
            closed: false,
        }
    }

    /// Sets the order.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

impl Order for CaptureConsumer {
    fn order(&self) -> i32 {
        self.order
    }
}

impl OutputConsumer for CaptureConsumer {
    fn consume(&mut self, output: Option<&str>) -> Result<(), IoError> {
        let Some(text) = output.filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        if self.closed {
            return Err(IoError::Closed);
        }
        match self.tag {
            Some(tag) => self.log.push(format!("{tag}:{text}")),
            None => self.log.push(text.to_string()),
        }
        Ok(())
    }

    fn close(&mut self) -> Result<(), IoError> {
        if !self.closed {
            self.closed = true;
            self.log.closed(self.tag);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct BufferState {
    bytes: Vec<u8>,
    flushes: usize,
}

/// Cloneable in-memory writer. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<BufferState>>);

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().bytes).into_owned()
    }

    /// Returns how many times `flush` was called.
    pub fn flush_count(&self) -> usize {
        self.0.lock().flushes
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().flushes += 1;
        Ok(())
    }
}

/// Writer that fails on write or on flush.
#[derive(Debug, Clone, Copy)]
pub struct FailingWriter {
    fail_write: bool,
}

impl FailingWriter {
    /// Every write fails.
    pub fn on_write() -> Self {
        Self { fail_write: true }
    }

    /// Writes succeed, every flush fails.
    pub fn on_flush() -> Self {
        Self { fail_write: false }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_write {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"))
    }
}

/// Writer whose first `failures` writes fail with `TimedOut`; later
/// writes go to a [`SharedBuffer`].
#[derive(Debug, Clone)]
pub struct FlakyWriter {
    failures: usize,
    sink: SharedBuffer,
}

impl FlakyWriter {
    /// Fails the next `failures` writes, then writes into `sink`.
    pub fn new(failures: usize, sink: SharedBuffer) -> Self {
        Self { failures, sink }
    }
}

impl Write for FlakyWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(io::Error::new(io::ErrorKind::TimedOut, "sink busy"));
        }
        self.sink.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
