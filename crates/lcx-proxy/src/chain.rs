//! Interceptor chain: ordered dispatch for one proxy point.
//!
//! Interceptors run highest order first. Equal orders run in
//! registration order, and that tie-break survives later
//! re-prioritization (see [`OrderedVec`]).
//!
//! Thread-safe when wrapped in `Arc<std::sync::RwLock<>>`:
//! `dispatch()` takes `&self`, registration takes `&mut self`.

use lcx_types::OrderedVec;
use tracing::{debug, warn};

use crate::{
    InterceptAction, InterceptorsConfig, ParameterView, ProxyError, ProxyPointInterceptor,
};

/// A registered interceptor with metadata.
struct RegisteredInterceptor {
    interceptor: Box<dyn ProxyPointInterceptor>,
    enabled: bool,
}

/// Ordered set of interceptors for a proxy point.
pub struct InterceptorChain {
    entries: OrderedVec<RegisteredInterceptor>,
}

impl InterceptorChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: OrderedVec::new(),
        }
    }

    /// Registers an interceptor using its own order. Returns its ID.
    pub fn register(&mut self, interceptor: Box<dyn ProxyPointInterceptor>) -> String {
        let order = interceptor.order();
        self.register_with_order(interceptor, order)
    }

    /// Registers an interceptor with an explicit order. Returns its ID.
    pub fn register_with_order(
        &mut self,
        interceptor: Box<dyn ProxyPointInterceptor>,
        order: i32,
    ) -> String {
        let id = interceptor.id().to_string();
        debug!(interceptor = %id, order, "registered interceptor");
        self.entries.push_with_order(
            RegisteredInterceptor {
                interceptor,
                enabled: true,
            },
            order,
        );
        id
    }

    /// Unregisters an interceptor by ID. Returns `true` if found and removed.
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|r| r.interceptor.id() != id);
        self.entries.len() < before
    }

    /// Enables or disables an interceptor by ID.
    /// Returns `false` if no interceptor has that ID.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|r| r.interceptor.id() == id) {
            Some(r) => {
                r.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Changes the order of an interceptor by ID.
    /// Returns `false` if no interceptor has that ID.
    pub fn set_order(&mut self, id: &str, order: i32) -> bool {
        self.entries
            .set_order(|r| r.interceptor.id() == id, order)
    }

    /// Applies declarative overrides.
    ///
    /// Definitions naming an unregistered interceptor are skipped with a
    /// warning.
    pub fn apply_config(&mut self, config: &InterceptorsConfig) {
        for def in &config.interceptors {
            if !self.set_enabled(&def.id, def.enabled) {
                warn!(interceptor = %def.id, "config names unknown interceptor, skipping");
                continue;
            }
            if let Some(order) = def.order {
                self.set_order(&def.id, order);
            }
            debug!(
                interceptor = %def.id,
                enabled = def.enabled,
                order = ?def.order,
                "applied interceptor config"
            );
        }
    }

    /// Returns interceptor IDs in dispatch order, including disabled ones.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|r| r.interceptor.id()).collect()
    }

    /// Returns the effective orders in dispatch order.
    #[must_use]
    pub fn orders(&self) -> Vec<i32> {
        self.entries.orders()
    }

    /// Returns `true` if an interceptor with this ID is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|r| r.enabled && r.interceptor.id() == id)
    }

    /// Returns the number of registered interceptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no interceptors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the enabled interceptors over `params`.
    ///
    /// Chain semantics:
    ///
    /// - `Continue` → the next interceptor sees the mutated view
    /// - `Abort` → stop immediately with [`ProxyError::Aborted`]
    /// - `Err` → stop immediately and propagate
    ///
    /// On success the view holds the parameters for the real call.
    ///
    /// # Errors
    ///
    /// [`ProxyError::Aborted`] if an interceptor aborted, otherwise the
    /// first error raised by an interceptor.
    pub fn dispatch(&self, params: &mut ParameterView) -> Result<(), ProxyError> {
        for r in self.entries.iter().filter(|r| r.enabled) {
            let id = r.interceptor.id();
            match r.interceptor.intercept(params)? {
                InterceptAction::Continue => {}
                InterceptAction::Abort { reason } => {
                    warn!(interceptor = %id, reason = %reason, "interceptor aborted the call");
                    return Err(ProxyError::Aborted {
                        interceptor: id.to_string(),
                        reason,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InterceptorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter_with_order()
                    .map(|(order, r)| (r.interceptor.id(), order, r.enabled)),
            )
            .finish()
    }
}
