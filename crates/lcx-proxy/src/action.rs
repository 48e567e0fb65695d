//! Intercept action: what an interceptor wants to happen next.

/// Result of running one interceptor.
///
/// `Default` is not implemented: every interceptor states explicitly
/// whether the call proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptAction {
    /// Pass the (possibly mutated) parameters downstream.
    Continue,

    /// Stop the chain; the real call is not made.
    Abort {
        /// Reason for aborting.
        reason: String,
    },
}

impl InterceptAction {
    /// Creates an `Abort` action.
    pub fn abort(reason: impl Into<String>) -> Self {
        Self::Abort {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a `Continue` variant.
    #[must_use]
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Returns `true` if this is an `Abort` variant.
    #[must_use]
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort { .. })
    }
}
