//! Message Synthesizer
//!
//! Produces one realistic log line per call:
//! - pick a template uniformly from the category catalog
//! - fill each slot with its named generator
//! - prefix with a millisecond timestamp and the category tag, or wrap the
//!   request line into the combined access-log layout

pub mod fields;
pub mod templates;

use chrono::{DateTime, Local};
use rand::Rng;

use crate::core::{Category, LogLine};
use crate::error::SimResult;
use templates::{Slot, Template};

/// `2026-10-17 14:03:07.512`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Generate one line for `category` using the thread RNG and the wall clock
pub fn generate(category: Category) -> LogLine {
    generate_with(category, &mut rand::rng(), Local::now())
}

/// Generate one line for a category given by name
pub fn generate_named(name: &str) -> SimResult<LogLine> {
    Ok(generate(name.parse()?))
}

/// Deterministic entry point: caller supplies the RNG and the clock reading
pub fn generate_with<R: Rng + ?Sized>(
    category: Category,
    rng: &mut R,
    now: DateTime<Local>,
) -> LogLine {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let catalog = templates::catalog(category);
    let template = &catalog[rng.random_range(0..catalog.len())];
    let message = render(template, rng);

    let text = match category.tag() {
        Some(tag) => format!("{timestamp} {tag} {message}"),
        None => render_access(rng, &timestamp, &message),
    };
    LogLine::new(category, text)
}

/// Fill every slot of `template` in order
pub fn render<R: Rng + ?Sized>(template: &Template, rng: &mut R) -> String {
    let mut out = String::with_capacity(template.text.len() + 12 * template.slots.len());
    let mut slots = template.slots.iter();

    for (i, part) in template.text.split("{}").enumerate() {
        if i > 0 {
            if let Some(slot) = slots.next() {
                out.push_str(&fill(*slot, rng));
            }
        }
        out.push_str(part);
    }
    out
}

/// `IP - USER [TS] "REQUEST HTTP/1.1" STATUS BYTES "REFERRER" "UA"`
fn render_access<R: Rng + ?Sized>(rng: &mut R, timestamp: &str, request: &str) -> String {
    let ip = fields::ip_address(rng);
    let user = fields::user_id(rng);
    let status = fields::http_status(rng);
    let bytes = fields::byte_count(rng);
    let referrer = fields::referrer(rng);
    let user_agent = fields::user_agent(rng);

    format!(
        "{ip} - {user} [{timestamp}] \"{request} HTTP/1.1\" {status} {bytes} \"{referrer}\" \"{user_agent}\""
    )
}

fn fill<R: Rng + ?Sized>(slot: Slot, rng: &mut R) -> String {
    match slot {
        Slot::Percent => rng.random_range(0..=100).to_string(),
        Slot::Megabytes => rng.random_range(100..=16_384).to_string(),
        Slot::Gigabytes => rng.random_range(10..=2_000).to_string(),
        Slot::Mbps => rng.random_range(10..=10_000).to_string(),
        Slot::LoadAverage => fields::load_average(rng),
        Slot::Count => rng.random_range(1..=1_000).to_string(),
        Slot::Days => rng.random_range(1..=365).to_string(),
        Slot::Hours => rng.random_range(0..=23).to_string(),
        Slot::Minutes => rng.random_range(1..=120).to_string(),
        Slot::Seconds => rng.random_range(1..=300).to_string(),
        Slot::Millis => rng.random_range(10..=30_000).to_string(),
        Slot::Celsius => rng.random_range(30..=95).to_string(),
        Slot::Rpm => rng.random_range(800..=5_000).to_string(),
        Slot::Port => fields::port(rng).to_string(),
        Slot::Version => fields::version(rng),
        Slot::Amount => fields::amount(rng),
        Slot::Ip => fields::ip_address(rng),
        Slot::Status => fields::http_status(rng).to_string(),
        Slot::Bytes => fields::byte_count(rng).to_string(),
        Slot::Referrer => fields::referrer(rng),
        Slot::UserAgent => fields::user_agent(rng),
        Slot::RequestPath => fields::request_path(rng),
        Slot::User => fields::user_id(rng),
        Slot::Email => fields::email(rng),
        Slot::Host => fields::host(rng),
        Slot::Service => fields::service(rng).to_string(),
        Slot::Id(prefix) => format!("{prefix}{}", rng.random_range(1_000..=99_999)),
        Slot::Word(words) => fields::pick(rng, words).to_string(),
        Slot::Range(lo, hi) => rng.random_range(lo..=hi).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 17, 14, 3, 7).unwrap()
    }

    /// Splits an access line into its combined-log fields
    fn parse_access(line: &str) -> Option<(String, u16, u32, String, String)> {
        let (ip, rest) = line.split_once(" - ")?;
        let (_user, rest) = rest.split_once(" [")?;
        let (_ts, rest) = rest.split_once("] \"")?;
        let (request, rest) = rest.split_once(" HTTP/1.1\" ")?;
        let mut parts = rest.splitn(3, ' ');
        let status = parts.next()?.parse().ok()?;
        let bytes = parts.next()?.parse().ok()?;
        let tail = parts.next()?;
        let (referrer, ua) = tail.strip_prefix('"')?.split_once("\" \"")?;
        let ua = ua.strip_suffix('"')?;
        assert!(!request.is_empty());
        Some((ip.to_string(), status, bytes, referrer.to_string(), ua.to_string()))
    }

    #[test]
    fn test_every_category_renders_single_lines() {
        let mut rng = StdRng::seed_from_u64(7);
        for category in Category::ALL {
            for _ in 0..300 {
                let line = generate_with(category, &mut rng, fixed_now());
                assert_eq!(line.category, category);
                assert!(!line.as_str().is_empty());
                assert!(!line.as_str().contains('\n') && !line.as_str().contains('\r'));
                assert!(!line.as_str().contains("{}"), "{line}");
            }
        }
    }

    #[test]
    fn test_tagged_prefix() {
        let mut rng = StdRng::seed_from_u64(11);
        let cases = [
            (Category::System, "[SYSTEM]"),
            (Category::Error, "[ERROR]"),
            (Category::Application, "[INFO]"),
        ];
        for (category, tag) in cases {
            let line = generate_with(category, &mut rng, fixed_now());
            let expected = format!("2026-10-17 14:03:07.000 {tag} ");
            assert!(line.as_str().starts_with(&expected), "{line}");
        }
    }

    #[test]
    fn test_access_line_shape() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..300 {
            let line = generate_with(Category::Access, &mut rng, fixed_now());
            let (ip, status, bytes, referrer, ua) =
                parse_access(line.as_str()).unwrap_or_else(|| panic!("bad shape: {line}"));
            assert_eq!(ip.split('.').count(), 4);
            assert!(fields::HTTP_STATUSES.contains(&status));
            assert!((fields::BYTES_MIN..=fields::BYTES_MAX).contains(&bytes));
            assert!(referrer.starts_with("https://"));
            assert!(ua.starts_with("Mozilla/5.0"));
            assert!(line.as_str().contains("[2026-10-17 14:03:07.000]"));
        }
    }

    #[test]
    fn test_render_fills_in_order() {
        let template = Template {
            text: "a {} b {} c",
            slots: &[Slot::Word(&["x"]), Slot::Range(5, 5)],
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(render(&template, &mut rng), "a x b 5 c");
    }

    #[test]
    fn test_generate_named() {
        assert!(generate_named("access").is_ok());
        assert!(matches!(
            generate_named("network"),
            Err(SimError::InvalidCategory { .. })
        ));
    }
}
