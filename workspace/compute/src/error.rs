use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// Rejected input: non-positive horizon, negative amount, malformed date...
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error from date operations
    #[error("Date error: {0}")]
    Date(String),

    /// Decimal arithmetic left the representable range
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// Error raised by an insight provider
    #[error("Insight error: {0}")]
    Insight(String),
}

impl ComputeError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ComputeError::InvalidArgument(_))
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
