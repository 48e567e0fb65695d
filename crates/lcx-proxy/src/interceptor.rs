//! Interceptor trait and testing utilities.

use lcx_types::Order;

use crate::{InterceptAction, ParameterView, ProxyError};

/// Auxiliary logic run at a proxy point before the real call.
///
/// Interceptors are registered with an
/// [`InterceptorChain`](crate::InterceptorChain) and run highest
/// [`Order::order`] first. Each one may read or overwrite parameter slots;
/// its writes are visible to every later interceptor and to the real call.
///
/// # Thread Safety
///
/// Interceptors must be `Send + Sync` so a chain can be shared between
/// threads. The [`ParameterView`] itself is never shared: it is passed by
/// `&mut` and belongs to one in-flight call.
pub trait ProxyPointInterceptor: Order + Send + Sync {
    /// Unique identifier for this interceptor.
    fn id(&self) -> &str;

    /// Inspects and possibly mutates the parameters.
    ///
    /// # Returns
    ///
    /// - `Ok(Continue)`: pass the parameters to the next interceptor / call
    /// - `Ok(Abort { reason })`: stop; the real call is not made
    /// - `Err(_)`: stop and propagate the error unchanged
    fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError>;
}

/// Test utilities for interceptors.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use parking_lot::Mutex;
    use std::sync::Arc;

    type InterceptFn =
        Box<dyn Fn(&mut ParameterView) -> Result<InterceptAction, ProxyError> + Send + Sync>;

    /// A mock interceptor for testing.
    ///
    /// Runs a fixed closure on every `intercept()` call and tracks the
    /// invocation count via `call_count`.
    pub struct MockInterceptor {
        /// Interceptor ID.
        pub id: String,
        /// Order.
        pub order: i32,
        /// Closure run on every intercept() call.
        pub action_fn: InterceptFn,
        /// Number of times intercept() has been called.
        pub call_count: Arc<AtomicUsize>,
    }

    impl MockInterceptor {
        fn with_fn(id: &str, action_fn: InterceptFn) -> Self {
            Self {
                id: id.to_string(),
                order: 0,
                action_fn,
                call_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Creates a pass-through mock that returns `Continue`.
        pub fn pass_through(id: &str) -> Self {
            Self::with_fn(id, Box::new(|_| Ok(InterceptAction::Continue)))
        }

        /// Creates a mock that mutates the view via the given function.
        pub fn modifier(
            id: &str,
            modifier: impl Fn(&mut ParameterView) -> Result<(), ProxyError> + Send + Sync + 'static,
        ) -> Self {
            Self::with_fn(
                id,
                Box::new(move |params| {
                    modifier(params)?;
                    Ok(InterceptAction::Continue)
                }),
            )
        }

        /// Creates a mock that aborts with the given reason.
        pub fn aborter(id: &str, reason: &str) -> Self {
            let reason = reason.to_string();
            Self::with_fn(id, Box::new(move |_| Ok(InterceptAction::abort(reason.clone()))))
        }

        /// Creates a mock that fails with the given error.
        pub fn failing(id: &str, err: ProxyError) -> Self {
            Self::with_fn(id, Box::new(move |_| Err(err.clone())))
        }

        /// Creates a mock that appends its ID to `log` and continues.
        pub fn recorder(id: &str, log: Arc<CallLog>) -> Self {
            let own = id.to_string();
            Self::with_fn(
                id,
                Box::new(move |_| {
                    log.push(&own);
                    Ok(InterceptAction::Continue)
                }),
            )
        }

        /// Sets the order.
        #[must_use]
        pub fn with_order(mut self, order: i32) -> Self {
            self.order = order;
            self
        }

        /// Returns the number of times this interceptor has run.
        pub fn calls(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl Order for MockInterceptor {
        fn order(&self) -> i32 {
            self.order
        }
    }

    impl ProxyPointInterceptor for MockInterceptor {
        fn id(&self) -> &str {
            &self.id
        }

        fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            (self.action_fn)(params)
        }
    }

    /// Shared, ordered record of interceptor IDs.
    ///
    /// Lets tests observe the order in which a chain ran its interceptors.
    #[derive(Debug, Default)]
    pub struct CallLog(Mutex<Vec<String>>);

    impl CallLog {
        /// Creates an empty shared log.
        pub fn shared() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Appends an entry.
        pub fn push(&self, id: &str) {
            self.0.lock().push(id.to_string());
        }

        /// Returns a copy of all entries.
        pub fn entries(&self) -> Vec<String> {
            self.0.lock().clone()
        }
    }
}
