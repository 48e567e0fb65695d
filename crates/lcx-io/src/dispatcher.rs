//! Output dispatcher: fans each output out to ordered consumers.

use lcx_types::OrderedVec;
use tracing::{debug, warn};

use crate::{IoError, OutputConsumer};

/// Ordered set of [`OutputConsumer`]s receiving the same outputs.
///
/// Consumers run highest order first; equal orders run in registration
/// order. Dropping the dispatcher closes every consumer.
pub struct OutputDispatcher {
    consumers: OrderedVec<Box<dyn OutputConsumer>>,
}

impl OutputDispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            consumers: OrderedVec::new(),
        }
    }

    /// Registers a consumer using its own order.
    pub fn register(&mut self, consumer: Box<dyn OutputConsumer>) {
        debug!(order = consumer.order(), "registered output consumer");
        self.consumers.push(consumer);
    }

    /// Hands `output` to every consumer in order.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first consumer error; later consumers do
    /// not see this output.
    pub fn dispatch(&mut self, output: Option<&str>) -> Result<(), IoError> {
        for consumer in self.consumers.iter_mut() {
            consumer.consume(output)?;
        }
        Ok(())
    }

    /// Closes every consumer.
    ///
    /// All consumers are closed even if some fail. Consumers close
    /// idempotently, so calling this again is harmless.
    ///
    /// # Errors
    ///
    /// Returns the first close error.
    pub fn close_all(&mut self) -> Result<(), IoError> {
        let mut first_err = None;
        for consumer in self.consumers.iter_mut() {
            if let Err(e) = consumer.close() {
                warn!(error = %e, "failed to close output consumer");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Returns the consumer orders in dispatch order.
    #[must_use]
    pub fn orders(&self) -> Vec<i32> {
        self.consumers.orders()
    }

    /// Returns the number of consumers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    /// Returns `true` if no consumers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }
}

impl Default for OutputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for OutputDispatcher {
    fn drop(&mut self) {
        // close_all already logs each failure.
        let _ = self.close_all();
    }
}

impl std::fmt::Debug for OutputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDispatcher")
            .field("orders", &self.orders())
            .finish()
    }
}
