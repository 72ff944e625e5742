//! Short URL service.
//!
//! This crate provides the service façade that composes the identifier
//! enumerator and the allocation table, and the matcher that validates short
//! URLs. Core types are re-exported from `snip_core`.

pub mod error;
pub mod matcher;
pub mod service;

pub use error::ShortenerError;
pub use matcher::ShortUrlMatcher;
pub use service::ShortUrlService;
pub use snip_core::{Alphabet, EnumeratorKind, Settings, WraparoundPolicy};
