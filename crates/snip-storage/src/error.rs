use snip_core::CoreError;
use thiserror::Error;

/// Result type for allocation table operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("all {capacity} identifiers are allocated")]
    CapacityExhausted { capacity: u64 },
    #[error(transparent)]
    Core(#[from] CoreError),
}
