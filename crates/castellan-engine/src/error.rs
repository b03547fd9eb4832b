//! Error taxonomy for metadata building, dispatch, and registration
//!
//! Build-time classification errors (`Configuration`) abort the whole
//! registration; dispatch-time errors abort only the current call (or the
//! remainder of a batch). Nothing is retried here; callers decide retry
//! policy.

use castellan_sdk::CallError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ManagementError>;

/// Errors raised while building descriptors, dispatching calls, or talking
/// to the bean server.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ManagementError {
    /// Bad marker usage detected while building a descriptor
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unknown attribute, operation, or accessor at dispatch time
    #[error("not found: {0}")]
    NotFound(String),

    /// Attribute assignment with a unit or type-mismatched value
    #[error("invalid attribute value: {0}")]
    InvalidValue(String),

    /// A declared type name did not resolve through the type registry
    #[error("unknown type name: {0}")]
    UnknownType(String),

    /// Method location on the resolved instance's runtime type failed
    #[error("reflection failure: {0}")]
    Reflection(String),

    /// A bound handle reported a failure; the cause is preserved
    #[error("invocation of {target} failed")]
    Invocation {
        /// `TypeName.methodName` of the failed call
        target: String,
        /// The handle-level cause
        #[source]
        source: CallError,
    },

    /// The registration name is already taken in the bean server
    #[error("{0} is already registered")]
    AlreadyExists(String),

    /// Any other registry-side failure
    #[error("registration error: {0}")]
    Registration(String),
}
