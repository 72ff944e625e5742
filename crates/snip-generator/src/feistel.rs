use crate::{Cursor, Enumerator};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snip_core::error::{CoreError, Result};
use snip_core::{Encoder, Identifier};
use typed_builder::TypedBuilder;

const DEFAULT_ROUNDS: usize = 4;
const MIN_ROUNDS: usize = 2;

#[derive(Debug, Clone, TypedBuilder)]
/// Tuning for [`FeistelEnumerator`].
pub struct FeistelParams {
    #[builder(default = DEFAULT_ROUNDS)]
    rounds: usize,
    /// Seed for the round keys; `None` draws them from OS entropy.
    #[builder(default, setter(strip_option))]
    seed: Option<u64>,
}

/// A keyed bijection on `[0, capacity)`.
///
/// A balanced Feistel network permutes the smallest even-width bit domain that
/// covers the capacity; values that land outside the range are fed back
/// through the network (cycle walking) until they land inside it. Since the
/// domain is less than four times the capacity, a walk takes a few rounds on
/// average.
#[derive(Debug, Clone)]
pub struct FeistelPermutation {
    capacity: u64,
    half_bits: u32,
    half_mask: u64,
    keys: Vec<u64>,
}

impl FeistelPermutation {
    pub fn new(capacity: u64, keys: Vec<u64>) -> Result<Self> {
        if capacity == 0 {
            return Err(CoreError::InvalidArgument(
                "cannot permute an empty range".to_string(),
            ));
        }
        if keys.len() < MIN_ROUNDS {
            return Err(CoreError::InvalidArgument(format!(
                "feistel network needs at least {} rounds, got {}",
                MIN_ROUNDS,
                keys.len()
            )));
        }

        let bits = u64::BITS - (capacity - 1).leading_zeros();
        let half_bits = bits.div_ceil(2).max(1);
        let half_mask = (1_u64 << half_bits) - 1;

        Ok(Self {
            capacity,
            half_bits,
            half_mask,
            keys,
        })
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Maps `position` (taken modulo the capacity) to its permuted value.
    pub fn permute(&self, position: u64) -> u64 {
        let mut value = self.network(position % self.capacity);
        while value >= self.capacity {
            value = self.network(value);
        }
        value
    }

    fn network(&self, value: u64) -> u64 {
        let mut left = (value >> self.half_bits) & self.half_mask;
        let mut right = value & self.half_mask;
        for &key in &self.keys {
            let next = left ^ (round(right, key) & self.half_mask);
            left = right;
            right = next;
        }
        (left << self.half_bits) | right
    }
}

/// splitmix64 finalizer over the keyed half-block.
fn round(half: u64, key: u64) -> u64 {
    let mut z = half.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ key;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Walks the identifier space in a keyed pseudo-random order without
/// materializing it.
///
/// Memory use is constant, so this suits spaces too large for
/// [`ShuffledEnumerator`](crate::ShuffledEnumerator).
#[derive(Debug, Clone)]
pub struct FeistelEnumerator {
    encoder: Encoder,
    permutation: FeistelPermutation,
    cursor: Cursor,
}

impl FeistelEnumerator {
    pub fn new(encoder: Encoder, params: FeistelParams) -> Result<Self> {
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let keys = (0..params.rounds).map(|_| rng.gen::<u64>()).collect();
        let permutation = FeistelPermutation::new(encoder.capacity(), keys)?;

        Ok(Self {
            encoder,
            permutation,
            cursor: Cursor::new(),
        })
    }

    pub fn permutation(&self) -> &FeistelPermutation {
        &self.permutation
    }
}

impl Enumerator for FeistelEnumerator {
    fn capacity(&self) -> u64 {
        self.encoder.capacity()
    }

    fn draws(&self) -> u64 {
        self.cursor.draws()
    }

    fn next_identifier(&self) -> Result<Identifier> {
        let position = self.cursor.advance(self.encoder.capacity());
        self.encoder.encode(self.permutation.permute(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{assert_full_cycle, encoder};
    use snip_core::alphabet::{BASE62, HEX_LOWER};
    use std::collections::HashSet;

    fn keys() -> Vec<u64> {
        vec![
            0xDEAD_BEEF_CAFE_BABE,
            0x0123_4567_89AB_CDEF,
            0x0F0F_F0F0_1234_4321,
            0x5555_AAAA_3333_CCCC,
        ]
    }

    fn assert_bijective(capacity: u64) {
        let permutation = FeistelPermutation::new(capacity, keys()).unwrap();
        let image: HashSet<u64> = (0..capacity).map(|p| permutation.permute(p)).collect();
        assert_eq!(image.len() as u64, capacity);
        assert!(image.iter().all(|&v| v < capacity));
    }

    #[test]
    fn permutation_is_bijective_on_various_sizes() {
        for capacity in [1, 2, 3, 9, 16, 243, 1000, 4096, 4097] {
            assert_bijective(capacity);
        }
    }

    #[test]
    fn positions_wrap_modulo_capacity() {
        let permutation = FeistelPermutation::new(9, keys()).unwrap();
        assert_eq!(permutation.permute(2), permutation.permute(11));
    }

    #[test]
    fn permutation_scrambles_order() {
        let permutation = FeistelPermutation::new(4096, keys()).unwrap();
        let first: Vec<u64> = (0..16).map(|p| permutation.permute(p)).collect();
        assert_ne!(first, (0..16).collect::<Vec<u64>>());
    }

    #[test]
    fn too_few_rounds_is_rejected() {
        let err = FeistelPermutation::new(16, vec![1]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));

        let params = FeistelParams::builder().rounds(1).seed(3).build();
        assert!(FeistelEnumerator::new(encoder("ab", 4), params).is_err());
    }

    #[test]
    fn empty_range_is_rejected() {
        assert!(FeistelPermutation::new(0, keys()).is_err());
    }

    #[test]
    fn enumerator_covers_the_space() {
        let params = FeistelParams::builder().seed(11).build();
        let enumerator = FeistelEnumerator::new(encoder(HEX_LOWER, 3), params).unwrap();

        let first = assert_full_cycle(&enumerator);
        let second = assert_full_cycle(&enumerator);
        assert_eq!(first, second);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let a = FeistelEnumerator::new(
            encoder(HEX_LOWER, 2),
            FeistelParams::builder().seed(5).build(),
        )
        .unwrap();
        let b = FeistelEnumerator::new(
            encoder(HEX_LOWER, 2),
            FeistelParams::builder().seed(5).build(),
        )
        .unwrap();

        assert_eq!(assert_full_cycle(&a), assert_full_cycle(&b));
    }

    #[test]
    fn large_space_needs_no_materialization() {
        // 62^8 identifiers
        let enumerator =
            FeistelEnumerator::new(encoder(BASE62, 8), FeistelParams::builder().seed(1).build())
                .unwrap();
        assert_eq!(enumerator.capacity(), 218_340_105_584_896);

        let drawn: HashSet<Identifier> = (0..10_000)
            .map(|_| enumerator.next_identifier().unwrap())
            .collect();
        assert_eq!(drawn.len(), 10_000);
        assert!(drawn.iter().all(|id| id.char_len() == 8));
    }
}
