//! I/O adapters for lcx.
//!
//! Outputs of a proxied call flow to one or more [`OutputConsumer`]s;
//! inputs come from an [`InputProvider`].
//!
//! # Output
//!
//! ```text
//! dispatch("42")
//!      │
//!      ▼
//! OutputDispatcher ── order 10 ──► BufferedOutputConsumer<File>
//!                  ── order  0 ──► BufferedOutputConsumer<Stdout>
//! ```
//!
//! Consumers run highest order first, ties in registration order. Empty
//! outputs are dropped by every consumer. Closing is idempotent, and
//! consuming after close fails with [`IoError::Closed`].
//!
//! # Input
//!
//! [`FileInputProvider`] yields one input per line with the line
//! terminator stripped, then `None`.
//!
//! # Configuration
//!
//! [`IoConfig::load`] reads a TOML file; [`IoConfig::build_dispatcher`]
//! and [`IoConfig::build_input`] turn it into live adapters.
//!
//! # Example
//!
//! ```
//! use lcx_io::{BufferedOutputConsumer, FileInputProvider, InputProvider, OutputDispatcher};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("out.txt");
//!
//! let mut input = FileInputProvider::from_reader(&b"a\n\nb\n"[..]);
//! let mut outputs = OutputDispatcher::new();
//! outputs.register(Box::new(BufferedOutputConsumer::create(&path)?));
//!
//! while let Some(line) = input.next_input()? {
//!     outputs.dispatch(Some(&line.to_uppercase()))?;
//! }
//! outputs.close_all()?;
//!
//! assert_eq!(std::fs::read_to_string(&path)?, "A\nB\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod buffered;
mod config;
mod dispatcher;
mod error;
mod input;
mod output;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use buffered::BufferedOutputConsumer;
pub use config::{InputDef, IoConfig, OutputDef, OutputTarget};
pub use dispatcher::OutputDispatcher;
pub use error::{ConfigError, IoError};
pub use input::{FileInputProvider, InputProvider};
pub use output::{OutputConsumer, SharedConsumer};
