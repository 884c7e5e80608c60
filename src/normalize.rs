use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Scraper chrome that leaks into review text: reviewer badges, counters,
// relative timestamps, the "New" marker and the translate link.
static BOILERPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)local\s+guide(?:\s*·\s*\d+\s+(?:reviews?|photos)\b)*|\bphotos\b|\breviews?\b|\b\d+\s+(?:months?|weeks?|days?|hours?)\s+ago\b|\bnew\b|see\s+translation\s*\(english\)",
    )
    .expect("boilerplate pattern is valid")
});

// Price bands such as "₹200–400" or "$10-20".
static PRICE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{Sc}\s*\d[\d,]*\s*[-–—]\s*\d[\d,]*").expect("price range pattern is valid")
});

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strip scraped boilerplate from a review blob.
///
/// Removal runs on the original line structure and repeats to a fixed point, so
/// text exposed by one removal (a "New" glued to a timestamp) is cleaned too.
/// Whitespace is collapsed only once nothing more matches.
pub fn normalize(raw: &str) -> String {
    let mut text: String = raw.nfc().collect();
    loop {
        let next = strip_pass(&text);
        if next == text {
            break;
        }
        text = next;
    }
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

fn strip_pass(s: &str) -> String {
    let s = BOILERPLATE_RE.replace_all(s, " ");
    PRICE_RANGE_RE.replace_all(&s, " ").into_owned()
}
