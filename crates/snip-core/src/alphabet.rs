use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;

/// Lowercase hexadecimal digits.
pub const HEX_LOWER: &str = "abcdef0123456789";
/// `[A-Za-z0-9]`, the usual base62 charset.
pub const BASE62: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// An ordered set of unique characters that identifiers are spelled with.
///
/// The position of a character is its digit value: the first character is `0`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    source: String,
    symbols: Vec<char>,
    index: HashMap<char, u32>,
}

impl Alphabet {
    /// Builds an alphabet from its characters, in digit order.
    ///
    /// At least two unique, printable, non-whitespace characters are required.
    pub fn new(chars: impl Into<String>) -> Result<Self> {
        let source = chars.into();
        let symbols: Vec<char> = source.chars().collect();

        if symbols.len() < 2 {
            return Err(CoreError::invalid(format!(
                "alphabet needs at least 2 characters, got {}",
                symbols.len()
            )));
        }
        if u32::try_from(symbols.len()).is_err() {
            return Err(CoreError::invalid("alphabet is too large"));
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (position, &c) in symbols.iter().enumerate() {
            if c.is_whitespace() || c.is_control() {
                return Err(CoreError::invalid(format!(
                    "alphabet contains a whitespace or control character: {:?}",
                    c
                )));
            }
            // position fits in u32, checked above
            if index.insert(c, position as u32).is_some() {
                return Err(CoreError::invalid(format!(
                    "alphabet contains duplicate character {:?}",
                    c
                )));
            }
        }

        Ok(Self {
            source,
            symbols,
            index,
        })
    }

    /// Number of symbols, the radix of identifiers spelled with this alphabet.
    pub fn radix(&self) -> u32 {
        self.symbols.len() as u32
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Character for digit value `digit`, if in range.
    pub fn symbol(&self, digit: u32) -> Option<char> {
        self.symbols.get(digit as usize).copied()
    }

    /// Digit value of `c`, if it belongs to the alphabet.
    pub fn digit(&self, c: char) -> Option<u32> {
        self.index.get(&c).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl TryFrom<String> for Alphabet {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Alphabet> for String {
    fn from(value: Alphabet) -> Self {
        value.source
    }
}

impl std::str::FromStr for Alphabet {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&self.source).finish()
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_follow_character_order() {
        let alphabet = Alphabet::new("abc").unwrap();
        assert_eq!(alphabet.radix(), 3);
        assert_eq!(alphabet.digit('a'), Some(0));
        assert_eq!(alphabet.digit('c'), Some(2));
        assert_eq!(alphabet.symbol(1), Some('b'));
        assert_eq!(alphabet.symbol(3), None);
        assert_eq!(alphabet.digit('z'), None);
    }

    #[test]
    fn builtin_charsets_are_valid() {
        assert_eq!(Alphabet::new(HEX_LOWER).unwrap().len(), 16);
        assert_eq!(Alphabet::new(BASE62).unwrap().len(), 62);
    }

    #[test]
    fn too_small() {
        assert!(Alphabet::new("").is_err());
        assert!(Alphabet::new("a").is_err());
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = Alphabet::new("abca").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn whitespace_is_rejected() {
        assert!(Alphabet::new("ab c").is_err());
        assert!(Alphabet::new("ab\n").is_err());
    }

    #[test]
    fn multibyte_characters_count_once() {
        let alphabet = Alphabet::new("αβγ").unwrap();
        assert_eq!(alphabet.radix(), 3);
        assert_eq!(alphabet.digit('γ'), Some(2));
    }

    #[test]
    fn serde_uses_plain_string() {
        let alphabet = Alphabet::new("abc").unwrap();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(json, "\"abc\"");

        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.digit('b'), Some(1));

        assert!(serde_json::from_str::<Alphabet>("\"aa\"").is_err());
    }
}
