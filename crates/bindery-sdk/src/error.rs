//! Error types for native thunks and host bridges

/// Result type for native thunks
pub type NativeResult<T> = Result<T, NativeError>;

/// Result type for host object-model operations
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Errors raised by native code behind a thunk
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Native operation failed
    #[error("Native error: {0}")]
    Failed(String),
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::Failed(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::Failed(s.to_string())
    }
}

/// Errors raised by a host's object model.
///
/// Initialization never catches these; they propagate to whoever asked the
/// host to load the module.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    /// Value is not a constructor
    #[error("Not a constructor: {0}")]
    NotAConstructor(String),

    /// Value is not a callable method
    #[error("Not callable: {0}")]
    NotCallable(String),

    /// Property lookup failed
    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    /// Receiver has no native instance in the requested internal slot
    #[error("Internal slot {index} is empty")]
    EmptyInternalSlot {
        /// Slot index
        index: usize,
    },

    /// Host refused the operation
    #[error("Host fault: {0}")]
    HostFault(String),

    /// A thunk returned an error
    #[error(transparent)]
    Native(#[from] NativeError),
}
