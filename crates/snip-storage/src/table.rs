use crate::error::{Result, StorageError};
use crate::record::AllocationRecord;
use jiff::SignedDuration;
use snip_core::settings::DEFAULT_TTL;
use snip_core::{Identifier, WraparoundPolicy};
use snip_generator::Enumerator;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Bidirectional map between locators and identifiers.
///
/// A locator that was seen before gets its old identifier back; a new one gets
/// the next identifier of the enumerator. Mutation takes `&mut self`, so a
/// host that shares the table between threads has to serialize access itself
/// (e.g. behind a `Mutex`).
///
/// Once the enumerator wraps around, a freshly drawn identifier may still be
/// bound to an older locator. Under [`WraparoundPolicy::Reuse`] the old binding
/// is dropped and that locator can no longer be resolved; size the alphabet and
/// length for the expected load.
#[derive(Debug)]
pub struct AllocationTable<E = Box<dyn Enumerator>> {
    enumerator: E,
    by_locator: HashMap<String, Identifier>,
    by_identifier: HashMap<Identifier, AllocationRecord>,
    ttl: SignedDuration,
    wraparound: WraparoundPolicy,
}

impl<E: Enumerator> AllocationTable<E> {
    /// Creates an empty table that draws identifiers from `enumerator`.
    pub fn new(enumerator: E) -> Self {
        Self {
            enumerator,
            by_locator: HashMap::new(),
            by_identifier: HashMap::new(),
            ttl: DEFAULT_TTL,
            wraparound: WraparoundPolicy::default(),
        }
    }

    /// Sets the advisory lifetime stamped on new records.
    pub fn with_ttl(mut self, ttl: SignedDuration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_wraparound(mut self, policy: WraparoundPolicy) -> Self {
        self.wraparound = policy;
        self
    }

    pub fn lookup_by_locator(&self, locator: &str) -> Option<&Identifier> {
        let found = self.by_locator.get(locator);
        trace!(locator, found = found.is_some(), "lookup by locator");
        found
    }

    pub fn lookup_by_identifier(&self, identifier: &str) -> Option<&str> {
        let found = self
            .by_identifier
            .get(identifier)
            .map(|record| record.locator.as_str());
        trace!(identifier, found = found.is_some(), "lookup by identifier");
        found
    }

    /// Full record bound to `identifier`, if any.
    pub fn record(&self, identifier: &str) -> Option<&AllocationRecord> {
        self.by_identifier.get(identifier)
    }

    /// Returns the identifier of `locator`, allocating one if it has none.
    ///
    /// Fails with [`StorageError::CapacityExhausted`] only under
    /// [`WraparoundPolicy::Reject`], once every identifier has been issued.
    pub fn allocate(&mut self, locator: &str) -> Result<Identifier> {
        if let Some(identifier) = self.by_locator.get(locator) {
            trace!(locator, identifier = %identifier, "locator already allocated");
            return Ok(identifier.clone());
        }

        if self.wraparound == WraparoundPolicy::Reject && self.enumerator.exhausted() {
            return Err(StorageError::CapacityExhausted {
                capacity: self.enumerator.capacity(),
            });
        }

        let identifier = self.enumerator.next_identifier()?;
        let record = AllocationRecord::new(locator, identifier.clone(), self.ttl);

        if let Some(orphaned) = self.by_identifier.insert(identifier.clone(), record) {
            self.by_locator.remove(&orphaned.locator);
            warn!(
                identifier = %identifier,
                orphaned = %orphaned.locator,
                capacity = self.enumerator.capacity(),
                "identifier reused after wraparound; previous locator is no longer resolvable"
            );
        }
        self.by_locator
            .insert(locator.to_owned(), identifier.clone());

        debug!(
            locator,
            identifier = %identifier,
            draws = self.enumerator.draws(),
            "allocated identifier"
        );
        Ok(identifier)
    }

    /// Drops the binding of `identifier`, for use by an external evictor.
    ///
    /// The identifier is not returned to the enumerator; it comes up again on
    /// the next cycle.
    pub fn release(&mut self, identifier: &str) -> Option<AllocationRecord> {
        let record = self.by_identifier.remove(identifier)?;
        self.by_locator.remove(&record.locator);
        debug!(identifier, locator = %record.locator, "released identifier");
        Some(record)
    }

    pub fn records(&self) -> impl Iterator<Item = &AllocationRecord> {
        self.by_identifier.values()
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }

    pub fn capacity(&self) -> u64 {
        self.enumerator.capacity()
    }

    /// `true` once the enumerator has started reissuing identifiers.
    pub fn wrapped(&self) -> bool {
        self.enumerator.draws() > self.enumerator.capacity()
    }

    pub fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    pub fn enumerator(&self) -> &E {
        &self.enumerator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snip_core::alphabet::HEX_LOWER;
    use snip_core::{Alphabet, Encoder};
    use snip_generator::{SequentialEnumerator, ShuffledEnumerator};

    fn sequential(chars: &str, length: usize) -> AllocationTable<SequentialEnumerator> {
        let encoder = Encoder::new(Alphabet::new(chars).unwrap(), length).unwrap();
        AllocationTable::new(SequentialEnumerator::new(encoder))
    }

    #[test]
    fn allocate_and_lookup_both_ways() {
        let mut table = sequential("ab", 2);

        let id = table.allocate("https://example.com").unwrap();

        assert_eq!(id.as_str(), "aa");
        assert_eq!(table.lookup_by_locator("https://example.com"), Some(&id));
        assert_eq!(table.lookup_by_identifier("aa"), Some("https://example.com"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn known_locator_keeps_its_identifier() {
        let mut table = sequential("ab", 2);

        let first = table.allocate("https://example.com").unwrap();
        let second = table.allocate("https://example.com").unwrap();

        assert_eq!(first, second);
        assert_eq!(table.enumerator().draws(), 1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn distinct_locators_get_distinct_identifiers() {
        let mut table = sequential("ab", 2);

        let ids: Vec<Identifier> = (0..4)
            .map(|i| table.allocate(&format!("https://example.com/{i}")).unwrap())
            .collect();

        let codes: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(codes, vec!["aa", "ba", "ab", "bb"]);
        assert!(!table.wrapped());
    }

    #[test]
    fn unknown_lookups_return_none() {
        let table = sequential("ab", 2);
        assert_eq!(table.lookup_by_locator("https://nowhere"), None);
        assert_eq!(table.lookup_by_identifier("aa"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn wraparound_orphans_the_previous_locator() {
        let mut table = sequential("ab", 1);

        let x = table.allocate("x").unwrap();
        table.allocate("y").unwrap();
        let z = table.allocate("z").unwrap();

        assert_eq!(x, z);
        assert!(table.wrapped());
        assert_eq!(table.lookup_by_identifier(z.as_str()), Some("z"));
        assert_eq!(table.lookup_by_locator("x"), None);
        assert_eq!(table.len(), 2);

        // a re-submitted orphan gets a fresh identifier, displacing "y"
        let x_again = table.allocate("x").unwrap();
        assert_eq!(x_again.as_str(), "b");
        assert_eq!(table.lookup_by_locator("y"), None);
    }

    #[test]
    fn reject_policy_stops_at_capacity() {
        let mut table = sequential("ab", 1).with_wraparound(WraparoundPolicy::Reject);

        table.allocate("x").unwrap();
        table.allocate("y").unwrap();

        assert_eq!(
            table.allocate("z"),
            Err(StorageError::CapacityExhausted { capacity: 2 })
        );
        // known locators are still served
        assert!(table.allocate("x").is_ok());
        assert_eq!(table.lookup_by_identifier("a"), Some("x"));
    }

    #[test]
    fn release_drops_both_directions() {
        let mut table = sequential("ab", 2);
        let id = table.allocate("https://example.com").unwrap();

        let record = table.release(id.as_str()).unwrap();

        assert_eq!(record.locator, "https://example.com");
        assert_eq!(table.lookup_by_locator("https://example.com"), None);
        assert_eq!(table.lookup_by_identifier(id.as_str()), None);
        assert!(table.release(id.as_str()).is_none());
    }

    #[test]
    fn records_carry_the_configured_ttl() {
        let mut table = sequential("ab", 2).with_ttl(SignedDuration::from_mins(5));
        let id = table.allocate("https://example.com").unwrap();

        let record = table.record(id.as_str()).unwrap();
        assert_eq!(table.ttl(), SignedDuration::from_mins(5));
        assert_eq!(
            record.expires_at,
            Some(record.issued_at + SignedDuration::from_mins(5))
        );
        assert_eq!(table.records().count(), 1);
    }

    #[test]
    fn works_with_boxed_shuffled_enumerator() {
        let encoder = Encoder::new(Alphabet::new(HEX_LOWER).unwrap(), 3).unwrap();
        let enumerator: Box<dyn Enumerator> =
            Box::new(ShuffledEnumerator::new(encoder, Some(3)).unwrap());
        let mut table: AllocationTable = AllocationTable::new(enumerator);

        for i in 0..table.capacity() {
            table.allocate(&format!("https://example.com/{i}")).unwrap();
        }

        assert_eq!(table.len(), 4096);
        assert!(!table.wrapped());
    }
}
