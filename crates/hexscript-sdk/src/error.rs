//! Error types raised by host calls

/// Result type for host calls
pub type HostResult<T> = Result<T, HostError>;

/// Errors a host call reports back to the guest script.
///
/// Every variant aborts the current script; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Malformed or missing argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// Patch address at or beyond the end of the data
    #[error("Range error: address {address:#x} out of range (data size {size:#x})")]
    Range {
        /// Requested address
        address: u64,
        /// Size of the data provider
        size: u64,
    },

    /// Class or member type does not extend the marker class
    #[error("Type error: {0}")]
    Type(String),
}

impl HostError {
    /// Build an argument error prefixed with the operation name.
    pub fn argument(op: &str, msg: impl std::fmt::Display) -> Self {
        HostError::Argument(format!("{}: {}", op, msg))
    }

    /// Short name of the error class, as shown to users.
    pub fn kind(&self) -> &'static str {
        match self {
            HostError::Argument(_) => "ArgumentError",
            HostError::Range { .. } => "RangeError",
            HostError::Type(_) => "TypeError",
        }
    }
}
