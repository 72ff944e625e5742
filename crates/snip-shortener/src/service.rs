use crate::error::{Result, ShortenerError};
use crate::matcher::ShortUrlMatcher;
use snip_core::Settings;
use snip_generator::{build_enumerator, Enumerator};
use snip_storage::AllocationTable;
use tracing::{debug, trace};

/// Shortens locators into `<domain><identifier>` URLs and resolves them back.
///
/// This service wraps an [`AllocationTable`] and a precompiled
/// [`ShortUrlMatcher`] to handle:
/// - reuse of the identifier of an already shortened locator
/// - pass-through of URLs that are already short
/// - syntax validation of short URLs before any lookup
///
/// `shorten` takes `&mut self`; share a service between threads behind a lock.
#[derive(Debug)]
pub struct ShortUrlService<E = Box<dyn Enumerator>> {
    settings: Settings,
    matcher: ShortUrlMatcher,
    table: AllocationTable<E>,
}

impl ShortUrlService {
    /// Builds the encoder, enumerator, matcher and table described by `settings`.
    ///
    /// Building a shuffled enumerator walks the whole identifier space; do it
    /// once, at startup.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let encoder = settings.encoder()?;
        let enumerator = build_enumerator(settings.enumerator, encoder, settings.seed)?;
        Self::with_enumerator(settings, enumerator)
    }
}

impl<E: Enumerator> ShortUrlService<E> {
    /// Creates a service drawing identifiers from a caller-provided enumerator.
    ///
    /// The enumerator must cover the space of `settings.alphabet` and
    /// `settings.length`.
    pub fn with_enumerator(settings: &Settings, enumerator: E) -> Result<Self> {
        let encoder = settings.encoder()?;
        if enumerator.capacity() != encoder.capacity() {
            return Err(ShortenerError::InvalidArgument(format!(
                "enumerator capacity {} does not match identifier space {}",
                enumerator.capacity(),
                encoder.capacity()
            )));
        }

        let matcher = ShortUrlMatcher::new(&settings.domain, &settings.alphabet, settings.length)?;
        let table = AllocationTable::new(enumerator)
            .with_ttl(settings.ttl)
            .with_wraparound(settings.wraparound);

        debug!(
            domain = %settings.domain,
            pattern = matcher.as_str(),
            capacity = encoder.capacity(),
            "short url service ready"
        );

        Ok(Self {
            settings: settings.clone(),
            matcher,
            table,
        })
    }

    /// Returns the short URL for `locator`.
    ///
    /// A locator that already starts with the service domain is returned
    /// unchanged. Under the default wraparound policy this only fails for an
    /// empty locator.
    pub fn shorten(&mut self, locator: &str) -> Result<String> {
        if locator.is_empty() {
            return Err(ShortenerError::InvalidLocator(
                "locator cannot be empty".to_string(),
            ));
        }
        if locator.starts_with(self.settings.domain.as_str()) {
            trace!(locator, "already a short url");
            return Ok(locator.to_owned());
        }

        let identifier = self.table.allocate(locator)?;
        Ok(identifier.to_url(&self.settings.domain))
    }

    /// Returns the locator behind `short_url`.
    ///
    /// Fails with [`ShortenerError::InvalidFormat`] when `short_url` is not of
    /// the form `<domain><identifier>`, and with [`ShortenerError::NotFound`]
    /// when it is but nothing is bound to it.
    pub fn resolve(&self, short_url: &str) -> Result<&str> {
        let Some(identifier) = self.matcher.identifier(short_url) else {
            trace!(short_url, "rejected malformed short url");
            return Err(ShortenerError::InvalidFormat(short_url.to_owned()));
        };

        self.table
            .lookup_by_identifier(identifier)
            .ok_or_else(|| ShortenerError::NotFound(short_url.to_owned()))
    }

    /// Number of distinct short URLs this service can issue.
    pub fn capacity(&self) -> u64 {
        self.table.capacity()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn matcher(&self) -> &ShortUrlMatcher {
        &self.matcher
    }

    pub fn table(&self) -> &AllocationTable<E> {
        &self.table
    }

    /// Mutable access for an external evictor, see [`AllocationTable::release`].
    pub fn table_mut(&mut self) -> &mut AllocationTable<E> {
        &mut self.table
    }
}
