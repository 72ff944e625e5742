//! In-memory allocation table mapping locators to identifiers and back.

pub mod error;
pub mod record;
pub mod table;

pub use error::StorageError;
pub use record::AllocationRecord;
pub use table::AllocationTable;
