//! Value generators for template slots
//!
//! Each function is pure apart from the RNG it is handed, so tests can pin
//! the output with a seeded `StdRng`.

use rand::Rng;

/// Status codes emitted on access lines
pub const HTTP_STATUSES: [u16; 13] = [
    200, 201, 204, 301, 302, 304, 400, 401, 403, 404, 500, 502, 503,
];

pub const BYTES_MIN: u32 = 500;
pub const BYTES_MAX: u32 = 150_000;

pub const TLDS: [&str; 6] = ["com", "org", "net", "edu", "co.uk", "io"];

pub const SITE_NAMES: [&str; 14] = [
    "example", "website", "blog", "news", "tech", "digital", "online", "web", "info", "data",
    "dev", "code", "site", "portal",
];

/// Empty entry means no subdomain
pub const SUBDOMAINS: [&str; 6] = ["www", "blog", "news", "dev", "docs", ""];

/// Empty entry means the site root
pub const REFERRER_PATHS: [&str; 9] = [
    "",
    "about",
    "contact",
    "news",
    "blog",
    "articles",
    "products",
    "services",
    "resources",
];

/// Browser family with its version pool and UA layout
pub struct Browser {
    pub name: &'static str,
    pub versions: [&'static str; 4],
    template: fn(&str, &str) -> String,
}

impl Browser {
    pub fn render(&self, os: &str, version: &str) -> String {
        (self.template)(os, version)
    }
}

pub static CHROME: Browser = Browser {
    name: "chrome",
    versions: ["90.0.4430.212", "91.0.4472.124", "92.0.4515.159", "93.0.4577.82"],
    template: chrome_desktop,
};

pub static FIREFOX: Browser = Browser {
    name: "firefox",
    versions: ["88.0", "89.0", "90.0", "91.0"],
    template: firefox_desktop,
};

pub static SAFARI: Browser = Browser {
    name: "safari",
    versions: ["14.1.1", "14.1.2", "15.0", "15.1"],
    template: safari_desktop,
};

pub static DESKTOP_BROWSERS: [&Browser; 3] = [&CHROME, &FIREFOX, &SAFARI];

fn chrome_desktop(os: &str, v: &str) -> String {
    format!("Mozilla/5.0 ({os}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{v} Safari/537.36")
}

fn firefox_desktop(os: &str, v: &str) -> String {
    format!("Mozilla/5.0 ({os}; rv:{v}) Gecko/20100101 Firefox/{v}")
}

fn safari_desktop(os: &str, v: &str) -> String {
    format!(
        "Mozilla/5.0 ({os}) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/{v} Safari/605.1.15"
    )
}

pub const DESKTOP_OS: [&str; 5] = [
    "Windows NT 10.0; Win64; x64",
    "Windows NT 6.1; Win64; x64",
    "Macintosh; Intel Mac OS X 10_15_7",
    "X11; Linux x86_64",
    "X11; Ubuntu; Linux x86_64",
];

pub const MOBILE_DEVICES: [&str; 5] = [
    "iPhone; CPU iPhone OS 14_6 like Mac OS X",
    "Linux; Android 11; SM-G991B",
    "Linux; Android 10; SM-A505FN",
    "iPhone; CPU iPhone OS 15_0 like Mac OS X",
    "Linux; Android 12; Pixel 6",
];

pub const MOBILE_SHARE: f64 = 0.3;

const SERVICES: [&str; 8] = [
    "auth-service",
    "payment-service",
    "api-gateway",
    "inventory-service",
    "recommendation-engine",
    "notification-service",
    "search-service",
    "cache-layer",
];

const HOSTS: [&str; 6] = ["db", "cache", "api", "web", "queue", "search"];

const ZONES: [&str; 3] = ["prod", "staging", "eu-west"];

const PORTS: [u16; 10] = [22, 80, 443, 3306, 5432, 6379, 8080, 8443, 9092, 27017];

const RESOURCES: [&str; 4] = ["users", "posts", "comments", "products"];

/// Uniform pick from a non-empty static list
pub fn pick<R: Rng + ?Sized>(rng: &mut R, items: &[&'static str]) -> &'static str {
    items[rng.random_range(0..items.len())]
}

/// Four octets, each in [1, 255]
pub fn ip_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.random_range(1..=255u8),
        rng.random_range(1..=255u8),
        rng.random_range(1..=255u8),
        rng.random_range(1..=255u8)
    )
}

pub fn http_status<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    HTTP_STATUSES[rng.random_range(0..HTTP_STATUSES.len())]
}

pub fn byte_count<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(BYTES_MIN..=BYTES_MAX)
}

/// `https://[subdomain.]site.tld[/path]`
pub fn referrer<R: Rng + ?Sized>(rng: &mut R) -> String {
    let subdomain = pick(rng, &SUBDOMAINS);
    let site = pick(rng, &SITE_NAMES);
    let tld = pick(rng, &TLDS);
    let path = pick(rng, &REFERRER_PATHS);

    let mut url = String::from("https://");
    if !subdomain.is_empty() {
        url.push_str(subdomain);
        url.push('.');
    }
    url.push_str(site);
    url.push('.');
    url.push_str(tld);
    if !path.is_empty() {
        url.push('/');
        url.push_str(path);
    }
    url
}

pub fn user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    if rng.random_bool(MOBILE_SHARE) {
        mobile_user_agent(rng)
    } else {
        desktop_user_agent(rng)
    }
}

pub fn desktop_user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    let browser = DESKTOP_BROWSERS[rng.random_range(0..DESKTOP_BROWSERS.len())];
    let os = pick(rng, &DESKTOP_OS);
    let version = pick(rng, &browser.versions);
    browser.render(os, version)
}

/// Mobile traffic is modelled as Chrome-based
pub fn mobile_user_agent<R: Rng + ?Sized>(rng: &mut R) -> String {
    let device = pick(rng, &MOBILE_DEVICES);
    let version = pick(rng, &CHROME.versions);
    format!(
        "Mozilla/5.0 ({device}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Mobile Safari/537.36"
    )
}

/// `/api/v{1-3}/{resource}/{id}`
pub fn request_path<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "/api/v{}/{}/{}",
        rng.random_range(1..=3),
        pick(rng, &RESOURCES),
        rng.random_range(1..=1000)
    )
}

pub fn user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("user_{}", rng.random_range(1000..=9999))
}

pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("user{}@example.com", rng.random_range(1..=1000))
}

pub fn service<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, &SERVICES)
}

pub fn host<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}-{:02}.{}.internal",
        pick(rng, &HOSTS),
        rng.random_range(1..=12),
        pick(rng, &ZONES)
    )
}

/// Mostly well-known service ports, sometimes an ephemeral one
pub fn port<R: Rng + ?Sized>(rng: &mut R) -> u16 {
    if rng.random_bool(0.8) {
        PORTS[rng.random_range(0..PORTS.len())]
    } else {
        rng.random_range(1024..=65535)
    }
}

pub fn version<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}",
        rng.random_range(1..=5),
        rng.random_range(0..=9),
        rng.random_range(0..=20)
    )
}

/// Currency amount with two decimals, 1.00 to 2000.00
pub fn amount<R: Rng + ?Sized>(rng: &mut R) -> String {
    let cents: u32 = rng.random_range(100..=200_000);
    format!("{}.{:02}", cents / 100, cents % 100)
}

pub fn load_average<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:.2}", rng.random_range(0.0..16.0f64))
}
