use crate::{Cursor, Enumerator};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use snip_core::error::{CoreError, Result};
use snip_core::{Encoder, Identifier};
use tracing::debug;

/// Largest space [`ShuffledEnumerator`] will materialize (16,777,216 codes).
///
/// Bigger spaces should use [`FeistelEnumerator`](crate::FeistelEnumerator).
pub const MAX_MATERIALIZED_CAPACITY: u64 = 1 << 24;

/// Walks a permutation of the identifier space that is shuffled once, up front.
///
/// Construction costs O(capacity) time and memory, so it belongs at startup.
pub struct ShuffledEnumerator {
    encoder: Encoder,
    order: Vec<u32>,
    cursor: Cursor,
}

impl ShuffledEnumerator {
    /// Materializes `[0, capacity)` and shuffles it.
    ///
    /// With `seed` the permutation is reproducible; without it the shuffle is
    /// seeded from OS entropy.
    pub fn new(encoder: Encoder, seed: Option<u64>) -> Result<Self> {
        let capacity = encoder.capacity();
        if capacity > MAX_MATERIALIZED_CAPACITY {
            return Err(CoreError::InvalidArgument(format!(
                "capacity {} is too large to materialize (max {}); use the feistel enumerator",
                capacity, MAX_MATERIALIZED_CAPACITY
            )));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // capacity <= 2^24, so every value fits in u32
        let mut order: Vec<u32> = (0..capacity as u32).collect();
        order.shuffle(&mut rng);

        debug!(capacity, "shuffled identifier space");

        Ok(Self {
            encoder,
            order,
            cursor: Cursor::new(),
        })
    }
}

impl std::fmt::Debug for ShuffledEnumerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShuffledEnumerator")
            .field("capacity", &self.order.len())
            .field("draws", &self.cursor.draws())
            .finish()
    }
}

impl Enumerator for ShuffledEnumerator {
    fn capacity(&self) -> u64 {
        self.encoder.capacity()
    }

    fn draws(&self) -> u64 {
        self.cursor.draws()
    }

    fn next_identifier(&self) -> Result<Identifier> {
        let position = self.cursor.advance(self.encoder.capacity());
        self.encoder.encode(u64::from(self.order[position as usize]))
    }
}
