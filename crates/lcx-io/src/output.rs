//! Output consumers: ordered sinks for the text a proxied call produces.
//!
//! # Lifecycle
//!
//! A consumer owns exactly one sink. [`OutputConsumer::close`] releases
//! it and is idempotent: only the first call does anything. Consuming
//! after close fails with [`IoError::Closed`].

use lcx_types::Order;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::IoError;

/// A resource-owning sink for string outputs.
///
/// Consumers are invoked highest [`Order::order`] first when several are
/// registered with an [`OutputDispatcher`](crate::OutputDispatcher).
pub trait OutputConsumer: Order + Send {
    /// Consumes one output.
    ///
    /// `None` and `""` are ignored: empty output never produces a blank
    /// line. Anything else is written followed by a line terminator and
    /// flushed before returning.
    ///
    /// # Errors
    ///
    /// [`IoError::Write`] / [`IoError::Flush`] if the sink fails,
    /// [`IoError::Closed`] after [`OutputConsumer::close`].
    fn consume(&mut self, output: Option<&str>) -> Result<(), IoError>;

    /// Releases the sink. Calls after the first are no-ops.
    ///
    /// Safe to call even if nothing was consumed.
    ///
    /// # Errors
    ///
    /// [`IoError::Close`] if the final flush fails. The sink is released
    /// regardless.
    fn close(&mut self) -> Result<(), IoError>;
}

/// A consumer shared by several producers.
///
/// [`OutputConsumer::consume`] takes `&mut self` and assumes sequential
/// use. Wrapping a consumer in `SharedConsumer` serializes access so
/// clones can be handed to producers on different threads.
#[derive(Clone)]
pub struct SharedConsumer {
    inner: Arc<Mutex<Box<dyn OutputConsumer>>>,
    order: i32,
}

impl SharedConsumer {
    /// Wraps `consumer`. The order is captured now.
    pub fn new(consumer: Box<dyn OutputConsumer>) -> Self {
        let order = consumer.order();
        Self {
            inner: Arc::new(Mutex::new(consumer)),
            order,
        }
    }
}

impl Order for SharedConsumer {
    fn order(&self) -> i32 {
        self.order
    }
}

impl OutputConsumer for SharedConsumer {
    fn consume(&mut self, output: Option<&str>) -> Result<(), IoError> {
        self.inner.lock().consume(output)
    }

    fn close(&mut self) -> Result<(), IoError> {
        self.inner.lock().close()
    }
}

impl std::fmt::Debug for SharedConsumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedConsumer")
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CaptureConsumer;
    use std::thread;

    #[test]
    fn shared_consumer_keeps_order() {
        let (capture, _log) = CaptureConsumer::new();
        let shared = SharedConsumer::new(Box::new(capture.with_order(4)));
        assert_eq!(shared.order(), 4);
    }

    #[test]
    fn shared_consumer_serializes_producers() {
        let (capture, log) = CaptureConsumer::new();
        let shared = SharedConsumer::new(Box::new(capture));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mut c = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        c.consume(Some(&format!("{t}-{i}"))).expect("consume");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("producer thread");
        }

        assert_eq!(log.events().len(), 100);
    }

    #[test]
    fn shared_close_is_idempotent_across_clones() {
        let (capture, log) = CaptureConsumer::new();
        let mut a = SharedConsumer::new(Box::new(capture));
        let mut b = a.clone();

        a.close().unwrap();
        b.close().unwrap();
        assert_eq!(log.close_count(), 1);
        assert!(matches!(b.consume(Some("late")), Err(IoError::Closed)));
    }
}
