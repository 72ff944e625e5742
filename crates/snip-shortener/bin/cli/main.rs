mod cli;

use crate::cli::{Command, CLI};
use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use snip_shortener::{ShortUrlService, ShortenerError};
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO_HOSTS: &[&str] = &[
    "example.com",
    "news.example.org",
    "docs.example.net",
    "shop.example.io",
];
const DEMO_SECTIONS: &[&str] = &["articles", "posts", "items", "wiki", "search"];

fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_json);

    let settings = config.settings()?;
    info!(
        domain = %settings.domain,
        alphabet = %settings.alphabet,
        length = settings.length,
        enumerator = %config.enumerator,
        wraparound = %config.wraparound,
        "starting snip"
    );

    let mut service = ShortUrlService::from_settings(&settings)?;
    info!(capacity = service.capacity(), "identifier space ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.command {
        Command::Demo { count, probes } => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            run_demo(&mut service, count, probes, &mut rng, &mut out)?;
        }
        Command::Repl => {
            let stdin = io::stdin();
            run_repl(&mut service, stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_demo<R: Rng, W: Write>(
    service: &mut ShortUrlService,
    count: usize,
    probes: usize,
    rng: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "This short url service can support {} urls",
        service.capacity()
    )?;

    for n in 0..count {
        let locator = synthetic_locator(rng, n);
        service.shorten(&locator)?;
    }
    info!(
        shortened = count,
        live = service.table().len(),
        wrapped = service.table().wrapped(),
        "shortened synthetic locators"
    );

    let domain = service.settings().domain.clone();
    let symbols = service.settings().alphabet.symbols().to_vec();
    let length = service.settings().length;
    for _ in 0..probes {
        let code: String = (0..length)
            .filter_map(|_| symbols.choose(rng))
            .collect();
        let short_url = format!("{domain}{code}");
        match service.resolve(&short_url) {
            Ok(locator) => writeln!(out, "{short_url} -> {locator}")?,
            Err(ShortenerError::NotFound(_)) => writeln!(out, "No match for: {short_url}")?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn synthetic_locator<R: Rng>(rng: &mut R, n: usize) -> String {
    let host = DEMO_HOSTS.choose(rng).copied().unwrap_or("example.com");
    let section = DEMO_SECTIONS.choose(rng).copied().unwrap_or("items");
    let slug: u32 = rng.gen();
    format!("https://{host}/{section}/{n}-{slug:08x}")
}

fn run_repl<I: BufRead, W: Write>(
    service: &mut ShortUrlService,
    input: I,
    out: &mut W,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(service.settings().domain.as_str()) {
            match service.resolve(line) {
                Ok(locator) => writeln!(out, "{line} -> {locator}")?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        } else {
            match service.shorten(line) {
                Ok(short_url) => writeln!(out, "{line} -> {short_url}")?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }
        out.flush()?;
    }
    Ok(())
}
