//! Proxy points for lcx.
//!
//! A proxy point wraps a real call: before the call runs, a chain of
//! interceptors inspects and mutates its parameters through a
//! [`ParameterView`].
//!
//! # Core Concepts
//!
//! ## Parameter View
//!
//! [`ParameterView`] is a fixed-length list of typed slots. A present
//! value must have exactly the declared [`ParamType`] of its slot, so an
//! interceptor cannot break the signature of the call it wraps.
//!
//! ## Interceptors
//!
//! [`ProxyPointInterceptor`] is one unit of auxiliary logic:
//!
//! ```ignore
//! pub trait ProxyPointInterceptor: Order + Send + Sync {
//!     fn id(&self) -> &str;
//!     fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError>;
//! }
//! ```
//!
//! ## Chain
//!
//! [`InterceptorChain`] runs interceptors highest order first, breaking
//! ties by registration order. `Abort` or an error stops the chain.
//!
//! ## Configuration
//!
//! [`InterceptorsConfig`] disables or re-orders registered interceptors
//! from TOML.
//!
//! # Example
//!
//! ```
//! use lcx_proxy::{InterceptAction, ParamType, ParamValue, ParameterView, ProxyError,
//!     ProxyPoint, ProxyPointInterceptor};
//! use lcx_types::Order;
//!
//! struct Clamp;
//!
//! impl Order for Clamp {}
//!
//! impl ProxyPointInterceptor for Clamp {
//!     fn id(&self) -> &str {
//!         "clamp"
//!     }
//!
//!     fn intercept(&self, params: &mut ParameterView) -> Result<InterceptAction, ProxyError> {
//!         if let Some(v) = params.get::<i32>(0)?.copied() {
//!             params.set(0, v.min(100))?;
//!         }
//!         Ok(InterceptAction::Continue)
//!     }
//! }
//!
//! let mut point = ProxyPoint::new("limit", vec![ParamType::of::<i32>()]);
//! point.chain_mut().register(Box::new(Clamp));
//!
//! let seen = point
//!     .invoke(Some(vec![Some(ParamValue::new(250_i32))]), |p| Ok(p.get::<i32>(0)?.copied()))
//!     .unwrap();
//! assert_eq!(seen, Some(100));
//! ```

mod action;
mod chain;
mod config;
mod error;
pub mod interceptor;
mod param;
mod point;
mod view;

pub use action::InterceptAction;
pub use chain::InterceptorChain;
pub use config::{InterceptorDef, InterceptorsConfig};
pub use error::ProxyError;
pub use interceptor::ProxyPointInterceptor;
pub use param::{ParamType, ParamValue};
pub use point::ProxyPoint;
pub use view::ParameterView;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    //! Test utilities for proxy points.
    //!
    //! Provides [`MockInterceptor`] and [`CallLog`] for use in tests.
    pub use crate::interceptor::testing::{CallLog, MockInterceptor};
}
