use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use snip_core::Identifier;

/// A locator bound to the identifier it was shortened to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// The original address.
    pub locator: String,
    pub identifier: Identifier,
    /// When the binding was created.
    pub issued_at: Timestamp,
    /// Advisory end of life, `issued_at + ttl`. Nothing in this crate enforces it;
    /// `None` if the sum is out of range.
    pub expires_at: Option<Timestamp>,
}

impl AllocationRecord {
    pub fn new(locator: impl Into<String>, identifier: Identifier, ttl: SignedDuration) -> Self {
        let issued_at = Timestamp::now();
        Self {
            locator: locator.into(),
            identifier,
            issued_at,
            expires_at: issued_at.checked_add(ttl).ok(),
        }
    }

    /// Whether an external evictor should consider this record stale at `now`.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}
