//! Unified error interface for lcx.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so callers
//! can branch on a stable, machine-readable code instead of matching on
//! display strings.
//!
//! # Example
//!
//! ```
//! use lcx_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum SinkError {
//!     Closed,
//!     Full,
//! }
//!
//! impl ErrorCode for SinkError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::Closed => "SINK_CLOSED",
//!             Self::Full => "SINK_FULL",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Full)
//!     }
//! }
//!
//! let err = SinkError::Full;
//! assert_eq!(err.code(), "SINK_FULL");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error classification.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, prefixed with the owning domain
///   (e.g. `"PROXY_TYPE_MISMATCH"`, `"IO_WRITE"`)
/// - **Stable**: codes are part of the API contract
///
/// # Recoverability
///
/// Nothing in lcx retries on its own. `is_recoverable` only tells the
/// surrounding dispatch mechanism whether a retry could possibly help:
/// invalid input and type mismatches never change on retry, a failed
/// write to a transient sink might.
pub trait ErrorCode {
    /// Returns a machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns `true` if retrying the failed operation may succeed.
    fn is_recoverable(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    enum Probe {
        Transient,
        Fatal,
    }

    impl ErrorCode for Probe {
        fn code(&self) -> &'static str {
            match self {
                Self::Transient => "PROBE_TRANSIENT",
                Self::Fatal => "PROBE_FATAL",
            }
        }

        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Transient)
        }
    }

    #[test]
    fn codes_are_upper_snake() {
        for err in [Probe::Transient, Probe::Fatal] {
            let code = err.code();
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn recoverability() {
        assert!(Probe::Transient.is_recoverable());
        assert!(!Probe::Fatal.is_recoverable());
    }
}
