use crate::error::{Result, ShortenerError};
use regex::Regex;
use snip_core::Alphabet;

/// Longest UTF-8 encoding of a single character.
const MAX_CHAR_BYTES: usize = 4;

/// Recognizes `<domain><identifier>` strings, compiled once per service.
///
/// Cheap length checks run before the regex, so empty and obviously
/// wrong-length candidates never reach the character class.
#[derive(Debug, Clone)]
pub struct ShortUrlMatcher {
    domain: String,
    length: usize,
    pattern: Regex,
}

impl ShortUrlMatcher {
    pub fn new(domain: &str, alphabet: &Alphabet, length: usize) -> Result<Self> {
        let class: String = alphabet
            .symbols()
            .iter()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; MAX_CHAR_BYTES])))
            .collect();
        let source = format!("^{}[{}]{{{}}}$", regex::escape(domain), class, length);
        let pattern = Regex::new(&source).map_err(|e| {
            ShortenerError::InvalidArgument(format!("cannot compile short url pattern: {e}"))
        })?;

        Ok(Self {
            domain: domain.to_owned(),
            length,
            pattern,
        })
    }

    /// Whether `candidate` is a complete, well-formed short URL.
    pub fn is_match(&self, candidate: &str) -> bool {
        self.has_plausible_length(candidate) && self.pattern.is_match(candidate)
    }

    /// The identifier part of `candidate`, if it is a well-formed short URL.
    pub fn identifier<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        if !self.is_match(candidate) {
            return None;
        }
        candidate.strip_prefix(self.domain.as_str())
    }

    /// The compiled pattern source.
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    fn has_plausible_length(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }
        let min_bytes = self.domain.len() + self.length;
        let max_bytes = self.domain.len() + self.length * MAX_CHAR_BYTES;
        if candidate.len() < min_bytes || candidate.len() > max_bytes {
            return false;
        }
        candidate
            .strip_prefix(self.domain.as_str())
            .is_some_and(|rest| rest.chars().count() == self.length)
    }
}
