//! Core types for the snip URL shortener.
//!
//! This crate holds the numeral conversion, the alphabet and identifier types,
//! the fixed-width identifier encoder, and the service settings shared by the
//! generator, storage and shortener crates.

pub mod alphabet;
pub mod encoder;
pub mod error;
pub mod identifier;
pub mod radix;
pub mod settings;

pub use alphabet::Alphabet;
pub use encoder::Encoder;
pub use error::CoreError;
pub use identifier::Identifier;
pub use settings::{EnumeratorKind, Settings, WraparoundPolicy};
