//! Proxy point: a named call site wrapped by an interceptor chain.

use tracing::debug;

use crate::{InterceptorChain, ParamType, ParamValue, ParameterView, ProxyError};

/// A call site that runs its interceptor chain before the real call.
///
/// The declared parameter types are fixed when the point is created;
/// every invocation builds a fresh [`ParameterView`] from them.
///
/// # Example
///
/// ```
/// use lcx_proxy::{ParamType, ParamValue, ProxyPoint};
///
/// let point = ProxyPoint::new("greet", vec![ParamType::of::<String>()]);
/// let out = point
///     .invoke(Some(vec![Some(ParamValue::new("bob".to_string()))]), |params| {
///         let name = params.get::<String>(0)?.cloned().unwrap_or_default();
///         Ok(format!("hello {name}"))
///     })
///     .unwrap();
/// assert_eq!(out, "hello bob");
/// ```
#[derive(Debug)]
pub struct ProxyPoint {
    name: String,
    types: Vec<ParamType>,
    chain: InterceptorChain,
}

impl ProxyPoint {
    /// Creates a proxy point with an empty chain.
    pub fn new(name: impl Into<String>, types: Vec<ParamType>) -> Self {
        Self {
            name: name.into(),
            types,
            chain: InterceptorChain::new(),
        }
    }

    /// Creates a proxy point with an existing chain.
    pub fn with_chain(
        name: impl Into<String>,
        types: Vec<ParamType>,
        chain: InterceptorChain,
    ) -> Self {
        Self {
            name: name.into(),
            types,
            chain,
        }
    }

    /// Returns the point name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameter types.
    #[must_use]
    pub fn types(&self) -> &[ParamType] {
        &self.types
    }

    /// Returns the interceptor chain.
    #[must_use]
    pub fn chain(&self) -> &InterceptorChain {
        &self.chain
    }

    /// Returns the interceptor chain for registration.
    pub fn chain_mut(&mut self) -> &mut InterceptorChain {
        &mut self.chain
    }

    /// Intercepts one call.
    ///
    /// Builds a view from `values`, runs the chain over it, then hands the
    /// (possibly mutated) view to `call`. The view is dropped when `call`
    /// returns, or right away if the chain stops.
    ///
    /// # Errors
    ///
    /// - view construction errors ([`ProxyError::InvalidArgument`],
    ///   [`ProxyError::TypeMismatch`])
    /// - [`ProxyError::Aborted`] or an interceptor error; `call` is not run
    /// - whatever `call` returns
    pub fn invoke<R>(
        &self,
        values: Option<Vec<Option<ParamValue>>>,
        call: impl FnOnce(ParameterView) -> Result<R, ProxyError>,
    ) -> Result<R, ProxyError> {
        let mut params = ParameterView::new(self.types.clone(), values)?;
        self.chain.dispatch(&mut params)?;
        debug!(point = %self.name, interceptors = self.chain.len(), "dispatching real call");
        call(params)
    }
}
