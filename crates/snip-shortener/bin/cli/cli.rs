use clap::{Parser, Subcommand, ValueEnum};
use jiff::SignedDuration;
use snip_core::alphabet::HEX_LOWER;
use snip_core::{Alphabet, EnumeratorKind, Settings, WraparoundPolicy};
use std::fmt::{Display, Formatter};

pub const DOMAIN_ENV: &str = "SNIP_DOMAIN";
pub const ALPHABET_ENV: &str = "SNIP_ALPHABET";
pub const LENGTH_ENV: &str = "SNIP_LENGTH";
pub const TTL_SECS_ENV: &str = "SNIP_TTL_SECS";
pub const ENUMERATOR_ENV: &str = "SNIP_ENUMERATOR";
pub const SEED_ENV: &str = "SNIP_SEED";
pub const WRAPAROUND_ENV: &str = "SNIP_WRAPAROUND";
pub const LOG_JSON_ENV: &str = "SNIP_LOG_JSON";

pub const DEFAULT_DOMAIN: &str = "https://goo.gl/";
pub const DEFAULT_LENGTH: usize = 3;
pub const DEFAULT_TTL_SECS: i64 = 30 * 24 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnumeratorArg {
    #[value(name = "shuffled")]
    Shuffled,
    #[value(name = "feistel")]
    Feistel,
    #[value(name = "sequential")]
    Sequential,
}

impl Display for EnumeratorArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        EnumeratorKind::from(*self).fmt(f)
    }
}

impl From<EnumeratorArg> for EnumeratorKind {
    fn from(value: EnumeratorArg) -> Self {
        match value {
            EnumeratorArg::Shuffled => EnumeratorKind::Shuffled,
            EnumeratorArg::Feistel => EnumeratorKind::Feistel,
            EnumeratorArg::Sequential => EnumeratorKind::Sequential,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WraparoundArg {
    #[value(name = "reuse")]
    Reuse,
    #[value(name = "reject")]
    Reject,
}

impl Display for WraparoundArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        WraparoundPolicy::from(*self).fmt(f)
    }
}

impl From<WraparoundArg> for WraparoundPolicy {
    fn from(value: WraparoundArg) -> Self {
        match value {
            WraparoundArg::Reuse => WraparoundPolicy::Reuse,
            WraparoundArg::Reject => WraparoundPolicy::Reject,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten synthetic locators, then probe random short URLs.
    Demo {
        /// Number of locators to shorten.
        #[arg(long, default_value_t = 1000)]
        count: usize,
        /// Number of random short URLs to resolve.
        #[arg(long, default_value_t = 20)]
        probes: usize,
    },
    /// Read lines from stdin: short URLs are resolved, anything else is shortened.
    Repl,
}

#[derive(Debug, Parser)]
#[command(name = "snip", about = "Fixed-length short URLs over a bounded alphabet")]
pub struct CLI {
    /// Short URL prefix; must end with '/'.
    #[arg(long, env = DOMAIN_ENV, default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Identifier characters, in digit order.
    #[arg(long, env = ALPHABET_ENV, default_value = HEX_LOWER)]
    pub alphabet: String,

    /// Identifier length.
    #[arg(long, env = LENGTH_ENV, default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Advisory record lifetime in seconds.
    #[arg(long, env = TTL_SECS_ENV, default_value_t = DEFAULT_TTL_SECS)]
    pub ttl_secs: i64,

    #[arg(
        long,
        env = ENUMERATOR_ENV,
        value_enum,
        default_value_t = EnumeratorArg::Shuffled
    )]
    pub enumerator: EnumeratorArg,

    /// Fixes the identifier permutation and the demo's randomness.
    #[arg(long, env = SEED_ENV)]
    pub seed: Option<u64>,

    #[arg(
        long,
        env = WRAPAROUND_ENV,
        value_enum,
        default_value_t = WraparoundArg::Reuse
    )]
    pub wraparound: WraparoundArg,

    /// Emit logs as JSON lines.
    #[arg(long, env = LOG_JSON_ENV)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CLI {
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let alphabet = Alphabet::new(self.alphabet.as_str())?;
        let mut settings = Settings::builder()
            .domain(self.domain.as_str())
            .alphabet(alphabet)
            .length(self.length)
            .ttl(SignedDuration::from_secs(self.ttl_secs))
            .enumerator(self.enumerator.into())
            .wraparound(self.wraparound.into())
            .build();
        settings.seed = self.seed;
        settings.validate()?;
        Ok(settings)
    }
}
