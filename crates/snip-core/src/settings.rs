use crate::alphabet::Alphabet;
use crate::encoder::Encoder;
use crate::error::{CoreError, Result};
use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use typed_builder::TypedBuilder;

/// Thirty days.
pub const DEFAULT_TTL: SignedDuration = SignedDuration::from_secs(30 * 24 * 3600);

/// Order in which the identifier space is walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnumeratorKind {
    /// Fully materialized permutation, shuffled once. Small spaces only.
    #[default]
    Shuffled,
    /// Keyed Feistel permutation computed on the fly.
    Feistel,
    /// Plain counting order. Predictable; for tests and debugging.
    Sequential,
}

impl Display for EnumeratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumeratorKind::Shuffled => write!(f, "shuffled"),
            EnumeratorKind::Feistel => write!(f, "feistel"),
            EnumeratorKind::Sequential => write!(f, "sequential"),
        }
    }
}

/// What to do once every identifier has been issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WraparoundPolicy {
    /// Start over and rebind identifiers; the previous owners become unresolvable.
    #[default]
    Reuse,
    /// Refuse further allocations.
    Reject,
}

impl Display for WraparoundPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WraparoundPolicy::Reuse => write!(f, "reuse"),
            WraparoundPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Construction-time configuration of a short URL service.
#[derive(Debug, Clone, TypedBuilder, Serialize, Deserialize)]
pub struct Settings {
    /// Prefix of every short URL, e.g. `https://goo.gl/`. Must end with `/`.
    #[builder(setter(into))]
    pub domain: String,
    pub alphabet: Alphabet,
    /// Number of characters in an identifier.
    pub length: usize,
    /// Advisory lifetime of an allocation. Not enforced by the service.
    #[builder(default = DEFAULT_TTL)]
    pub ttl: SignedDuration,
    #[builder(default)]
    pub enumerator: EnumeratorKind,
    /// Fixes the permutation; `None` draws a fresh one from OS entropy.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,
    #[builder(default)]
    pub wraparound: WraparoundPolicy,
}

impl Settings {
    /// Checks the domain and builds the encoder for `alphabet` and `length`.
    pub fn encoder(&self) -> Result<Encoder> {
        self.validate()?;
        Encoder::new(self.alphabet.clone(), self.length)
    }

    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            return Err(CoreError::invalid("domain must not be empty"));
        }
        if !self.domain.ends_with('/') {
            return Err(CoreError::invalid(format!(
                "domain must end with '/': {}",
                self.domain
            )));
        }
        if self.ttl.is_negative() {
            return Err(CoreError::invalid(format!(
                "ttl must not be negative: {}",
                self.ttl
            )));
        }
        Ok(())
    }
}
