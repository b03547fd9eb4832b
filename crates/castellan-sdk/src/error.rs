//! Error types raised by bound method handles

/// Result type for handle invocations
pub type CallResult = Result<crate::ManagedValue, CallError>;

/// Failures raised while invoking a bound method handle.
///
/// These are the causes the engine wraps into its invocation errors; the
/// taxonomy stays small because everything a target method raises collapses
/// into [`CallError::Failed`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum CallError {
    /// An argument's runtime type does not match what the method expects
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// An argument is missing or otherwise unusable
    #[error("argument error: {0}")]
    ArgumentError(String),

    /// The receiver could not be downcast to the handle's concrete type
    #[error("wrong receiver type: expected {expected}")]
    ReceiverMismatch {
        /// The concrete type the handle was bound against
        expected: String,
    },

    /// The target method itself reported a failure
    #[error("{0}")]
    Failed(String),
}

impl From<String> for CallError {
    fn from(s: String) -> Self {
        CallError::Failed(s)
    }
}

impl From<&str> for CallError {
    fn from(s: &str) -> Self {
        CallError::Failed(s.to_string())
    }
}
