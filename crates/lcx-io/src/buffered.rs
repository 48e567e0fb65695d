//! Line-buffered text consumer.

use lcx_types::{Order, DEFAULT_ORDER};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::{IoError, OutputConsumer};

/// An [`OutputConsumer`] backed by a buffered writer.
///
/// Every consumed output is written with a trailing `'\n'` and flushed
/// immediately, so each line is visible as soon as `consume` returns.
/// A line whose write or flush fails is dropped from the buffer, so
/// retrying it cannot write it twice.
///
/// Dropping an unclosed consumer closes it; a failure there can only be
/// logged.
///
/// # Example
///
/// ```
/// use lcx_io::{BufferedOutputConsumer, OutputConsumer};
///
/// let mut out = BufferedOutputConsumer::new(Vec::new());
/// out.consume(Some("hello")).unwrap();
/// out.consume(Some("")).unwrap();
/// assert_eq!(out.get_ref().unwrap().as_slice(), b"hello\n");
/// out.close().unwrap();
/// ```
pub struct BufferedOutputConsumer<W: Write> {
    writer: Option<BufWriter<W>>,
    order: i32,
}

impl<W: Write + Send> BufferedOutputConsumer<W> {
    /// Wraps `writer`. Order defaults to [`DEFAULT_ORDER`].
    pub fn new(writer: W) -> Self {
        Self {
            writer: Some(BufWriter::new(writer)),
            order: DEFAULT_ORDER,
        }
    }

    /// Wraps `writer` with a buffer of at least `capacity` bytes.
    ///
    /// Lines at least as long as the buffer go straight to `writer`.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Self {
            writer: Some(BufWriter::with_capacity(capacity, writer)),
            order: DEFAULT_ORDER,
        }
    }

    /// Sets the order.
    #[must_use]
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Returns `true` once [`OutputConsumer::close`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Borrows the underlying writer, or `None` once closed.
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        self.writer.as_ref().map(BufWriter::get_ref)
    }
}

impl BufferedOutputConsumer<Stdout> {
    /// Creates a consumer writing to standard output.
    #[must_use]
    pub fn console() -> Self {
        Self::new(io::stdout())
    }
}

impl BufferedOutputConsumer<File> {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// [`IoError::Open`] if the file cannot be created.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| IoError::open(path, e))?;
        debug!(path = %path.display(), "opened output file");
        Ok(Self::new(file))
    }

    /// Opens the file at `path` for appending, creating it if missing.
    ///
    /// # Errors
    ///
    /// [`IoError::Open`] if the file cannot be opened.
    pub fn append(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| IoError::open(path, e))?;
        debug!(path = %path.display(), "opened output file for append");
        Ok(Self::new(file))
    }
}

impl<W: Write> BufferedOutputConsumer<W> {
    fn discard_pending(&mut self) {
        if let Some(writer) = self.writer.take() {
            let capacity = writer.capacity();
            let (inner, pending) = writer.into_parts();
            if let Ok(bytes) = pending {
                if !bytes.is_empty() {
                    warn!(bytes = bytes.len(), "discarded unwritten output");
                }
            }
            self.writer = Some(BufWriter::with_capacity(capacity, inner));
        }
    }
}

fn write_line<W: Write>(writer: &mut BufWriter<W>, text: &str) -> Result<(), IoError> {
    writer.write_all(text.as_bytes()).map_err(IoError::Write)?;
    writer.write_all(b"\n").map_err(IoError::Write)?;
    writer.flush().map_err(IoError::Flush)
}

impl<W: Write> Order for BufferedOutputConsumer<W> {
    fn order(&self) -> i32 {
        self.order
    }
}

impl<W: Write + Send> OutputConsumer for BufferedOutputConsumer<W> {
    fn consume(&mut self, output: Option<&str>) -> Result<(), IoError> {
        let Some(text) = output.filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        let writer = self.writer.as_mut().ok_or(IoError::Closed)?;
        let result = write_line(writer, text);
        if result.is_err() {
            self.discard_pending();
        }
        result
    }

    fn close(&mut self) -> Result<(), IoError> {
        // Taken before flushing: the sink counts as released even if the
        // final flush fails.
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        let flushed = writer.flush();
        // into_parts skips the flush-on-drop of BufWriter.
        drop(writer.into_parts());
        flushed.map_err(IoError::Close)?;
        debug!("closed output consumer");
        Ok(())
    }
}

impl<W: Write> Drop for BufferedOutputConsumer<W> {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!(error = %e, "failed to flush output consumer on drop");
            }
        }
    }
}
