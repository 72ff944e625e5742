use snip_shortener::{Alphabet, Settings, ShortUrlService, ShortenerError};

fn base62_service() -> ShortUrlService {
    let settings = Settings::builder()
        .domain("https://sn.ip/")
        .alphabet(Alphabet::new(snip_core::alphabet::BASE62).unwrap())
        .length(3)
        .build();
    ShortUrlService::from_settings(&settings).unwrap()
}

#[test]
fn shorten_twice_returns_the_same_url() {
    let mut service = base62_service();

    let first = service.shorten("https://www.rust-lang.org/learn").unwrap();
    let second = service.shorten("https://www.rust-lang.org/learn").unwrap();

    assert_eq!(first, second);
}

#[test]
fn different_locators_get_different_urls() {
    let mut service = base62_service();

    let a = service.shorten("https://example.com/a").unwrap();
    let b = service.shorten("https://example.com/b").unwrap();

    assert_ne!(a, b);
}

#[test]
fn resolve_inverts_shorten() {
    let mut service = base62_service();
    let locators: Vec<String> = (0..500)
        .map(|i| format!("https://example.com/{i}?q=%20{i}#frag"))
        .collect();

    let shorts: Vec<String> = locators
        .iter()
        .map(|l| service.shorten(l).unwrap())
        .collect();

    for (locator, short) in locators.iter().zip(&shorts) {
        assert_eq!(service.resolve(short).unwrap(), locator);
    }
}

#[test]
fn malformed_and_unknown_urls_are_told_apart() {
    let service = base62_service();

    assert!(matches!(
        service.resolve("not-a-valid-url"),
        Err(ShortenerError::InvalidFormat(_))
    ));
    assert!(matches!(
        service.resolve("https://sn.ip/ab!"),
        Err(ShortenerError::InvalidFormat(_))
    ));
    assert!(matches!(
        service.resolve("https://sn.ip/abc"),
        Err(ShortenerError::NotFound(_))
    ));
}

#[test]
fn short_urls_are_not_shortened_again() {
    let mut service = base62_service();
    let short = service.shorten("https://example.com").unwrap();

    assert_eq!(service.shorten(&short).unwrap(), short);
    assert_eq!(service.table().len(), 1);
}

#[test]
fn service_can_be_shared_behind_a_mutex() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    let service = Arc::new(Mutex::new(base62_service()));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                (0..50)
                    .map(|i| {
                        let locator = format!("https://example.com/{t}/{i}");
                        let short = service.lock().unwrap().shorten(&locator).unwrap();
                        (locator, short)
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let pairs: Vec<(String, String)> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    let service = service.lock().unwrap();
    assert_eq!(service.table().len(), 400);
    for (locator, short) in &pairs {
        assert_eq!(service.resolve(short).unwrap(), locator);
    }
}
