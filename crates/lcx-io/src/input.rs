//! Input providers: line sources for proxied calls.
//!
//! # Example
//!
//! ```
//! use lcx_io::{FileInputProvider, InputProvider};
//!
//! let mut input = FileInputProvider::from_reader(&b"[1,2]\r\n3\n"[..]);
//! assert_eq!(input.next_input().unwrap().as_deref(), Some("[1,2]"));
//! assert_eq!(input.next_input().unwrap().as_deref(), Some("3"));
//! assert_eq!(input.next_input().unwrap(), None);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::IoError;

/// A source of text inputs, one per line.
pub trait InputProvider: Send {
    /// Returns the next input line without its line terminator, or
    /// `None` once the source is exhausted or closed.
    ///
    /// # Errors
    ///
    /// [`IoError::Read`] if the source fails or is not valid UTF-8.
    fn next_input(&mut self) -> Result<Option<String>, IoError>;

    /// Releases the source. Calls after the first are no-ops.
    ///
    /// # Errors
    ///
    /// Reserved for sources whose release can fail.
    fn close(&mut self) -> Result<(), IoError>;
}

/// Buffered input from a file path, an open file, or any byte stream.
pub struct FileInputProvider {
    reader: Option<BufReader<Box<dyn Read + Send>>>,
    origin: Option<PathBuf>,
}

impl FileInputProvider {
    /// Opens the file at `path`.
    ///
    /// # Errors
    ///
    /// [`IoError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IoError::open(path, e))?;
        debug!(path = %path.display(), "opened input file");
        let mut provider = Self::from_file(file);
        provider.origin = Some(path.to_path_buf());
        Ok(provider)
    }

    /// Reads from an already opened file.
    #[must_use]
    pub fn from_file(file: File) -> Self {
        Self::from_reader(file)
    }

    /// Reads from an arbitrary byte stream.
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Some(BufReader::new(Box::new(reader))),
            origin: None,
        }
    }

    /// Returns the path this provider was opened from, if any.
    #[must_use]
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// Returns `true` once closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl InputProvider for FileInputProvider {
    fn next_input(&mut self) -> Result<Option<String>, IoError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut line = String::new();
        let n = reader.read_line(&mut line).map_err(IoError::Read)?;
        if n == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn close(&mut self) -> Result<(), IoError> {
        if self.reader.take().is_some() {
            debug!(path = ?self.origin, "closed input provider");
        }
        Ok(())
    }
}

impl Read for FileInputProvider {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.reader.as_mut() {
            Some(r) => r.read(buf),
            None => Ok(0),
        }
    }
}

impl BufRead for FileInputProvider {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self.reader.as_mut() {
            Some(r) => r.fill_buf(),
            None => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        if let Some(r) = self.reader.as_mut() {
            r.consume(amt);
        }
    }
}

impl fmt::Debug for FileInputProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInputProvider")
            .field("origin", &self.origin)
            .field("closed", &self.is_closed())
            .finish()
    }
}
