use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt::Display;

/// A fixed-length short code spelled with the characters of an [`Alphabet`].
///
/// Identifiers are produced by an [`Encoder`], which guarantees the length and
/// character invariants. Values built with [`Identifier::new_unchecked`] carry
/// no such guarantee and should only come from trusted sources (e.g. a short
/// URL that already passed the service's matcher).
///
/// [`Alphabet`]: crate::alphabet::Alphabet
/// [`Encoder`]: crate::encoder::Encoder
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(SmolStr);

impl Identifier {
    pub(crate) fn from_encoded(code: String) -> Self {
        Self(SmolStr::new(code))
    }

    /// Creates an `Identifier` without validation.
    pub fn new_unchecked(code: impl AsRef<str>) -> Self {
        Self(SmolStr::new(code))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters, which equals the configured identifier length.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Appends the identifier to `domain`, which is expected to end with `/`.
    pub fn to_url(&self, domain: &str) -> String {
        let mut url = String::with_capacity(domain.len() + self.0.len());
        url.push_str(domain);
        url.push_str(&self.0);
        url
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Identifier").field(&self.0).finish()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // the alphabet is not known here; callers re-check with `Encoder::decode`
        let s = SmolStr::deserialize(deserializer)?;
        Ok(Self(s))
    }
}
