use thiserror::Error;

/// Errors raised by the numeral conversion and identifier encoding layer.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A radix, alphabet, length or domain that cannot be used to build identifiers.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A value outside the representable range `[0, capacity)`.
    #[error("value {value} exceeds identifier capacity {capacity}")]
    CapacityExceeded { value: u64, capacity: u64 },
}

impl CoreError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
