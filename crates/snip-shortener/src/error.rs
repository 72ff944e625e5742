use snip_core::CoreError;
use snip_storage::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    /// The input does not look like a short URL of this service.
    #[error("not a valid short url: {0}")]
    InvalidFormat(String),
    /// A well-formed short URL that nothing is bound to.
    #[error("no match for short url: {0}")]
    NotFound(String),
    #[error("invalid locator: {0}")]
    InvalidLocator(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("capacity exceeded: {0}")]
    CapacityExceeded(String),
    #[error("capacity exhausted: {0}")]
    CapacityExhausted(String),
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidArgument(message) => Self::InvalidArgument(message),
            err @ CoreError::CapacityExceeded { .. } => Self::CapacityExceeded(err.to_string()),
        }
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            err @ StorageError::CapacityExhausted { .. } => {
                Self::CapacityExhausted(err.to_string())
            }
            StorageError::Core(core) => core.into(),
        }
    }
}
