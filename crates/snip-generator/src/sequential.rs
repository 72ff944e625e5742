use crate::{Cursor, Enumerator};
use snip_core::error::Result;
use snip_core::{Encoder, Identifier};

/// Walks the identifier space in counting order: `aaa`, `baa`, `caa`, ...
///
/// Codes issued this way are trivially guessable from one another, so this
/// enumerator is meant for tests and debugging. Use
/// [`ShuffledEnumerator`](crate::ShuffledEnumerator) or
/// [`FeistelEnumerator`](crate::FeistelEnumerator) in a real deployment.
#[derive(Debug, Clone)]
pub struct SequentialEnumerator {
    encoder: Encoder,
    cursor: Cursor,
}

impl SequentialEnumerator {
    pub fn new(encoder: Encoder) -> Self {
        Self {
            encoder,
            cursor: Cursor::new(),
        }
    }

    /// Creates an enumerator that has already handed out `offset` identifiers.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(encoder: Encoder, offset: u64) -> Self {
        Self {
            encoder,
            cursor: Cursor::with_offset(offset),
        }
    }
}

impl Enumerator for SequentialEnumerator {
    fn capacity(&self) -> u64 {
        self.encoder.capacity()
    }

    fn draws(&self) -> u64 {
        self.cursor.draws()
    }

    fn next_identifier(&self) -> Result<Identifier> {
        let position = self.cursor.advance(self.encoder.capacity());
        self.encoder.encode(position)
    }
}
