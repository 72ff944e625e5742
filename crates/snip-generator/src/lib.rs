//! Enumerators over a bounded identifier space.
//!
//! An enumerator walks every identifier of an [`Encoder`]'s space exactly once
//! per cycle, then starts over. The order is a permutation of `[0, capacity)`
//! so that consecutive short URLs are not guessable from each other.

pub mod feistel;
pub mod sequential;
pub mod shuffled;

pub use feistel::{FeistelEnumerator, FeistelParams};
pub use sequential::SequentialEnumerator;
pub use shuffled::{ShuffledEnumerator, MAX_MATERIALIZED_CAPACITY};

use snip_core::error::Result;
use snip_core::{Encoder, EnumeratorKind, Identifier};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Infinite, cyclic source of identifiers.
///
/// Implementations are pure generators that don't interact with storage.
/// Within one cycle every identifier is produced once; after `capacity()`
/// draws the sequence repeats.
pub trait Enumerator: std::fmt::Debug + Send + Sync + 'static {
    /// Number of distinct identifiers in one cycle.
    fn capacity(&self) -> u64;

    /// Total number of identifiers drawn so far.
    fn draws(&self) -> u64;

    /// Draws the next identifier and advances the cursor.
    fn next_identifier(&self) -> Result<Identifier>;

    /// `true` once a full cycle has been handed out, i.e. the next draw repeats.
    fn exhausted(&self) -> bool {
        self.draws() >= self.capacity()
    }
}

impl<E: Enumerator + ?Sized> Enumerator for Box<E> {
    fn capacity(&self) -> u64 {
        (**self).capacity()
    }

    fn draws(&self) -> u64 {
        (**self).draws()
    }

    fn next_identifier(&self) -> Result<Identifier> {
        (**self).next_identifier()
    }

    fn exhausted(&self) -> bool {
        (**self).exhausted()
    }
}

/// Monotonic draw counter shared by the enumerators.
#[derive(Debug, Default)]
pub struct Cursor {
    draws: AtomicU64,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the counter at `offset` draws.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            draws: AtomicU64::new(offset),
        }
    }

    /// Claims the next draw and returns its position within the cycle.
    pub fn advance(&self, capacity: u64) -> u64 {
        self.draws.fetch_add(1, Ordering::SeqCst) % capacity
    }

    pub fn draws(&self) -> u64 {
        self.draws.load(Ordering::SeqCst)
    }
}

impl Clone for Cursor {
    fn clone(&self) -> Self {
        Self::with_offset(self.draws())
    }
}

/// Builds the enumerator selected by `kind`.
///
/// `seed` fixes the permutation of the shuffled and Feistel enumerators; the
/// sequential enumerator ignores it.
pub fn build_enumerator(
    kind: EnumeratorKind,
    encoder: Encoder,
    seed: Option<u64>,
) -> Result<Box<dyn Enumerator>> {
    debug!(
        kind = %kind,
        capacity = encoder.capacity(),
        seeded = seed.is_some(),
        "building identifier enumerator"
    );

    let enumerator: Box<dyn Enumerator> = match kind {
        EnumeratorKind::Shuffled => Box::new(ShuffledEnumerator::new(encoder, seed)?),
        EnumeratorKind::Feistel => {
            let params = match seed {
                Some(seed) => FeistelParams::builder().seed(seed).build(),
                None => FeistelParams::builder().build(),
            };
            Box::new(FeistelEnumerator::new(encoder, params)?)
        }
        EnumeratorKind::Sequential => Box::new(SequentialEnumerator::new(encoder)),
    };
    Ok(enumerator)
}
