//! Foundation types for lcx.
//!
//! lcx is a support library for method interception ("proxy points"):
//! interceptors inspect and mutate the parameters of a call before it
//! runs, and output consumers persist the text the call produces.
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Foundation Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  lcx-types : ErrorCode, Order, OrderedVec, BeanRegistry     │  ◄── HERE
//! └─────────────────────────────────────────────────────────────┘
//!           ↓                                   ↓
//! ┌────────────────────────────┐   ┌────────────────────────────┐
//! │  lcx-proxy                 │   │  lcx-io                    │
//! │  ParameterView,            │   │  OutputConsumer,           │
//! │  InterceptorChain,         │   │  FileInputProvider,        │
//! │  ProxyPoint                │   │  OutputDispatcher          │
//! └────────────────────────────┘   └────────────────────────────┘
//! ```
//!
//! # Ordering
//!
//! Same-role objects implement [`Order`]. They run highest order first;
//! equal orders run in registration order (see [`OrderedVec`]).

mod bean;
mod error;
mod order;

pub use bean::{BeanCandidate, BeanDescriptor, BeanError, BeanRegistry};
pub use error::ErrorCode;
pub use order::{sort_by_order, Order, OrderedVec, DEFAULT_ORDER};
