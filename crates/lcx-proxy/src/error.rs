//! Error types for proxy points.

use lcx_types::ErrorCode;
use thiserror::Error;

/// Errors raised while building, mutating, or dispatching a parameter view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyError {
    /// Out-of-range position, mismatched lengths, or another bad input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value's runtime type differs from the declared parameter type.
    #[error("illegal parameter value type at position {pos}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Parameter position.
        pos: usize,
        /// Declared type name.
        expected: &'static str,
        /// Runtime type name of the rejected value.
        actual: &'static str,
    },

    /// An interceptor aborted the call.
    #[error("proxy point aborted by [{interceptor}]: {reason}")]
    Aborted {
        /// ID of the interceptor that aborted.
        interceptor: String,
        /// Reason given by the interceptor.
        reason: String,
    },

    /// Interceptor configuration could not be parsed.
    #[error("invalid interceptor config: {0}")]
    Config(String),
}

impl ProxyError {
    /// Creates an [`ProxyError::InvalidArgument`] error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl ErrorCode for ProxyError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "PROXY_INVALID_ARGUMENT",
            Self::TypeMismatch { .. } => "PROXY_TYPE_MISMATCH",
            Self::Aborted { .. } => "PROXY_ABORTED",
            Self::Config(_) => "PROXY_CONFIG",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_argument() {
        let err = ProxyError::invalid_argument("Illegal parameter position.");
        assert_eq!(
            err.to_string(),
            "invalid argument: Illegal parameter position."
        );
    }

    #[test]
    fn display_type_mismatch() {
        let err = ProxyError::TypeMismatch {
            pos: 1,
            expected: "i32",
            actual: "&str",
        };
        assert_eq!(
            err.to_string(),
            "illegal parameter value type at position 1: expected i32, got &str"
        );
    }

    #[test]
    fn display_aborted() {
        let err = ProxyError::Aborted {
            interceptor: "guard".into(),
            reason: "blocked".into(),
        };
        assert_eq!(err.to_string(), "proxy point aborted by [guard]: blocked");
    }

    #[test]
    fn codes_and_recoverability() {
        let errs = [
            ProxyError::invalid_argument("x"),
            ProxyError::TypeMismatch {
                pos: 0,
                expected: "a",
                actual: "b",
            },
            ProxyError::Aborted {
                interceptor: "i".into(),
                reason: "r".into(),
            },
            ProxyError::Config("bad".into()),
        ];
        let codes: Vec<_> = errs.iter().map(ErrorCode::code).collect();
        assert_eq!(
            codes,
            vec![
                "PROXY_INVALID_ARGUMENT",
                "PROXY_TYPE_MISMATCH",
                "PROXY_ABORTED",
                "PROXY_CONFIG"
            ]
        );
        assert!(errs.iter().all(|e| !e.is_recoverable()));
    }
}
