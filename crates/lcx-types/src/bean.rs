//! Bean registry: explicit registration table for discoverable implementations.
//!
//! Implementations (interceptors, output consumers, ...) are registered
//! at startup under a `::`-separated namespace together with a
//! constructor. [`BeanRegistry::collect`] then plays the role of a
//! package scan: it walks every descriptor inside a namespace, filters
//! them, and instantiates the survivors.
//!
//! # Example
//!
//! ```
//! use lcx_types::BeanRegistry;
//!
//! let mut registry: BeanRegistry<String> = BeanRegistry::new();
//! registry
//!     .register("app::greeters", "hello", || "hello".to_string())
//!     .unwrap();
//! registry
//!     .register("app::greeters::loud", "shout", || "HELLO".to_string())
//!     .unwrap();
//!
//! let beans = registry.collect_all("app::greeters", |_| true).unwrap();
//! assert_eq!(beans, vec!["hello".to_string(), "HELLO".to_string()]);
//! ```

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::ErrorCode;

/// Errors from registering or collecting beans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeanError {
    /// A required argument was blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A bean with the same namespace and name is already registered.
    #[error("bean already registered: {namespace}::{name}")]
    Duplicate {
        /// Namespace of the existing bean.
        namespace: String,
        /// Name of the existing bean.
        name: String,
    },
}

impl ErrorCode for BeanError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "BEAN_INVALID_ARGUMENT",
            Self::Duplicate { .. } => "BEAN_DUPLICATE",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

/// Identity of a registered bean: where it lives and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeanDescriptor {
    namespace: String,
    name: String,
}

impl BeanDescriptor {
    /// Returns the namespace the bean was registered under.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the bean name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if this bean lives in `namespace` or one of its
    /// nested namespaces.
    #[must_use]
    pub fn is_within(&self, namespace: &str) -> bool {
        match self.namespace.strip_prefix(namespace) {
            Some("") => true,
            Some(rest) => rest.starts_with("::"),
            None => false,
        }
    }
}

impl fmt::Display for BeanDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.name)
    }
}

type Constructor<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A registered descriptor paired with its constructor.
///
/// Handed to the `creator` of [`BeanRegistry::collect`], which may use
/// [`BeanCandidate::construct`] or build the instance some other way.
pub struct BeanCandidate<T> {
    descriptor: BeanDescriptor,
    constructor: Constructor<T>,
}

impl<T> BeanCandidate<T> {
    /// Returns the descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &BeanDescriptor {
        &self.descriptor
    }

    /// Builds a fresh instance with the registered constructor.
    #[must_use]
    pub fn construct(&self) -> T {
        (self.constructor)()
    }
}

impl<T> fmt::Debug for BeanCandidate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanCandidate")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Registration table mapping `namespace::name` to a constructor.
///
/// Candidates are visited in registration order.
pub struct BeanRegistry<T> {
    candidates: Vec<BeanCandidate<T>>,
}

impl<T> BeanRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }

    /// Registers a constructor under `namespace::name`.
    ///
    /// # Errors
    ///
    /// - [`BeanError::InvalidArgument`] if `namespace` or `name` is blank
    /// - [`BeanError::Duplicate`] if the key is already taken
    pub fn register(
        &mut self,
        namespace: &str,
        name: &str,
        constructor: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<(), BeanError> {
        require_not_blank(namespace, "The beans namespace cannot be blank.")?;
        require_not_blank(name, "The bean name cannot be blank.")?;

        let exists = self
            .candidates
            .iter()
            .any(|c| c.descriptor.namespace == namespace && c.descriptor.name == name);
        if exists {
            return Err(BeanError::Duplicate {
                namespace: namespace.to_string(),
                name: name.to_string(),
            });
        }

        debug!(namespace, name, "registered bean");
        self.candidates.push(BeanCandidate {
            descriptor: BeanDescriptor {
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            constructor: Arc::new(constructor),
        });
        Ok(())
    }

    /// Collects beans registered within `namespace`.
    ///
    /// Every candidate in the namespace (or a nested one) that passes
    /// `filter` is turned into an instance by `creator`. Returns an empty
    /// `Vec` when nothing matches.
    ///
    /// # Errors
    ///
    /// [`BeanError::InvalidArgument`] if `namespace` is blank.
    pub fn collect<U>(
        &self,
        namespace: &str,
        filter: impl Fn(&BeanDescriptor) -> bool,
        creator: impl Fn(&BeanCandidate<T>) -> U,
    ) -> Result<Vec<U>, BeanError> {
        require_not_blank(namespace, "The beans namespace cannot be blank.")?;

        let beans: Vec<U> = self
            .candidates
            .iter()
            .filter(|c| c.descriptor.is_within(namespace))
            .filter(|c| filter(&c.descriptor))
            .map(creator)
            .collect();

        debug!(namespace, count = beans.len(), "collected beans");
        Ok(beans)
    }

    /// Collects beans within `namespace` using their registered constructors.
    ///
    /// # Errors
    ///
    /// [`BeanError::InvalidArgument`] if `namespace` is blank.
    pub fn collect_all(
        &self,
        namespace: &str,
        filter: impl Fn(&BeanDescriptor) -> bool,
    ) -> Result<Vec<T>, BeanError> {
        self.collect(namespace, filter, BeanCandidate::construct)
    }

    /// Iterates all registered descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &BeanDescriptor> {
        self.candidates.iter().map(|c| &c.descriptor)
    }

    /// Returns the number of registered beans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<T> Default for BeanRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for BeanRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.candidates.iter().map(|c| &c.descriptor))
            .finish()
    }
}

fn require_not_blank(value: &str, message: &str) -> Result<(), BeanError> {
    if value.trim().is_empty() {
        return Err(BeanError::InvalidArgument(message.to_string()));
    }
    Ok(())
}
