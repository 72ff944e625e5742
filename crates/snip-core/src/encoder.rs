use crate::alphabet::Alphabet;
use crate::error::{CoreError, Result};
use crate::identifier::Identifier;
use crate::radix;

/// Maps integers in `[0, capacity)` onto fixed-width identifiers.
///
/// Digits are written least-significant first and zero-padded with the
/// alphabet's first character, so with `a..z` and a width of 6, `3` encodes to
/// `"daaaaa"`.
#[derive(Debug, Clone)]
pub struct Encoder {
    alphabet: Alphabet,
    length: usize,
    capacity: u64,
}

impl Encoder {
    /// Creates an encoder for identifiers of `length` characters.
    ///
    /// Fails when `length` is zero or when `radix^length` does not fit in a `u64`.
    pub fn new(alphabet: Alphabet, length: usize) -> Result<Self> {
        if length == 0 {
            return Err(CoreError::invalid("identifier length must be at least 1"));
        }
        let capacity = u32::try_from(length)
            .ok()
            .and_then(|exp| u64::from(alphabet.radix()).checked_pow(exp))
            .ok_or_else(|| {
                CoreError::invalid(format!(
                    "capacity {}^{} does not fit in 64 bits",
                    alphabet.radix(),
                    length
                ))
            })?;

        Ok(Self {
            alphabet,
            length,
            capacity,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of distinct identifiers, `radix^length`.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Encodes `n` as an identifier of exactly `length` characters.
    pub fn encode(&self, n: u64) -> Result<Identifier> {
        encode(n, &self.alphabet, self.length)
    }

    /// Inverse of [`Encoder::encode`].
    pub fn decode(&self, code: &str) -> Result<u64> {
        let digits = code
            .chars()
            .map(|c| {
                self.alphabet.digit(c).ok_or_else(|| {
                    CoreError::invalid(format!("character {:?} is not in the alphabet", c))
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        if digits.len() != self.length {
            return Err(CoreError::invalid(format!(
                "identifier must be {} characters, got {}",
                self.length,
                digits.len()
            )));
        }

        radix::from_digits(&digits, self.alphabet.radix())
    }

    /// Returns `true` when `code` has the right length and only alphabet characters.
    pub fn is_valid(&self, code: &str) -> bool {
        let mut count = 0;
        for c in code.chars() {
            if !self.alphabet.contains(c) {
                return false;
            }
            count += 1;
        }
        count == self.length
    }
}

/// Encodes `n` in the radix of `alphabet`, padded to `length` characters.
///
/// Fails with [`CoreError::CapacityExceeded`] when `n` needs more than `length`
/// digits.
pub fn encode(n: u64, alphabet: &Alphabet, length: usize) -> Result<Identifier> {
    let mut digits = radix::to_digits(n, alphabet.radix())?;
    if digits.len() > length {
        return Err(CoreError::CapacityExceeded {
            value: n,
            capacity: capacity_hint(alphabet, length),
        });
    }
    digits.resize(length, 0);

    let mut code = String::with_capacity(length);
    for digit in digits {
        // every digit is < radix by construction
        if let Some(c) = alphabet.symbol(digit) {
            code.push(c);
        }
    }
    Ok(Identifier::from_encoded(code))
}

fn capacity_hint(alphabet: &Alphabet, length: usize) -> u64 {
    u32::try_from(length)
        .ok()
        .and_then(|exp| u64::from(alphabet.radix()).checked_pow(exp))
        .unwrap_or(u64::MAX)
}
