//! Metadata sanitization
//!
//! Best-effort scrubber for display fields polluted with HTML fragments and
//! extraction artifacts. This is not a parser: it runs a bounded number of
//! regex passes (each pass can expose new artifacts for the next), stops
//! early once a pass makes no change, and falls back to "Unknown" when the
//! result still looks like markup or is too short to display.

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel returned for null-ish or unsalvageable values
pub const UNKNOWN: &str = "Unknown";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static OPEN_FRAGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*").unwrap());
static CLOSE_FRAGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^<\s]*>").unwrap());
static ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[#a-zA-Z0-9]+;?").unwrap());
static RESIDUAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<>"'`]"#).unwrap());
static ATTR_QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\w+\s*=\s*["'][^"']*["']"#).unwrap());
static ATTR_BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+\s*=\s*\w+").unwrap());
static PECIAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpecial\b").unwrap());
static HTML_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(div|span|style|class|href|src|alt)\b").unwrap());
static STILL_DIRTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>]|&\w+;|\w+=|/>").unwrap());

/// Leftover tag text that survives regex stripping (e.g. a literal
/// "</div>" that arrived already entity-decoded and mangled)
const ARTIFACTS: &[&str] = &[
    "</div>", "<div>", "</span>", "<span>", "</p>", "<p>", "</h1>", "<h1>", "</h2>", "<h2>",
    "</h3>", "<h3>", "</strong>", "<strong>", "</em>", "<em>", "</b>", "<b>", "</i>", "<i>",
    "</br>", "<br>", "<br/>", "div>", "span>", "/div", "/span", "style=", "class=", "id=",
    "href=", "src=", "alt=", "onclick=", "onload=", "&nbsp;", "&amp;", "&lt;", "&gt;", "&quot;",
    "&#39;",
];

fn is_null_sentinel(text: &str) -> bool {
    matches!(
        text.to_lowercase().as_str(),
        "" | "none" | "null" | "undefined"
    )
}

/// Clean one metadata field into a display-safe string.
///
/// `passes` bounds the tag-stripping iterations; cleaning stops early when a
/// pass changes nothing. The result is idempotent: cleaning an already-clean
/// string returns it unchanged.
pub fn clean_field(value: Option<&str>, passes: usize) -> String {
    let raw = match value {
        Some(v) => v.trim(),
        None => return UNKNOWN.to_string(),
    };

    if is_null_sentinel(raw) {
        return UNKNOWN.to_string();
    }

    let mut text = raw.to_string();

    // Tag stripping: tags are replaced with a space so adjacent words do not
    // fuse ("</div>Special<div>Committee" -> "Special Committee")
    for _ in 0..passes.max(1) {
        let before = text.clone();
        text = TAG.replace_all(&text, " ").into_owned();
        text = OPEN_FRAGMENT.replace_all(&text, " ").into_owned();
        text = CLOSE_FRAGMENT.replace_all(&text, " ").into_owned();
        if text == before {
            break;
        }
    }

    text = ENTITY.replace_all(&text, " ").into_owned();

    for artifact in ARTIFACTS {
        if text.contains(artifact) {
            text = text.replace(artifact, " ");
        }
    }

    text = RESIDUAL_CHARS.replace_all(&text, "").into_owned();
    text = ATTR_QUOTED.replace_all(&text, " ").into_owned();
    text = ATTR_BARE.replace_all(&text, " ").into_owned();

    // Common OCR/extraction casualty: a leading S lost from "Special"
    text = PECIAL.replace_all(&text, "Special").into_owned();

    text = HTML_WORDS.replace_all(&text, " ").into_owned();

    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if STILL_DIRTY.is_match(&text) || text.chars().count() < 2 {
        return UNKNOWN.to_string();
    }

    text
}

/// Clean a publish-date field; dates that clean away entirely become
/// "Date not available" rather than "Unknown"
pub fn clean_date_field(value: Option<&str>, passes: usize) -> String {
    let cleaned = clean_field(value, passes);
    if cleaned == UNKNOWN || cleaned.chars().count() <= 3 {
        "Date not available".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSES: usize = 5;

    #[test]
    fn test_null_sentinels() {
        assert_eq!(clean_field(None, PASSES), "Unknown");
        assert_eq!(clean_field(Some(""), PASSES), "Unknown");
        assert_eq!(clean_field(Some("None"), PASSES), "Unknown");
        assert_eq!(clean_field(Some("null"), PASSES), "Unknown");
        assert_eq!(clean_field(Some("undefined"), PASSES), "Unknown");
        assert_eq!(clean_field(Some("   "), PASSES), "Unknown");
    }

    #[test]
    fn test_tag_removal_preserves_word_boundaries() {
        assert_eq!(
            clean_field(Some("</div>Special<div>Committee"), PASSES),
            "Special Committee"
        );
    }

    #[test]
    fn test_pecial_repair() {
        assert_eq!(clean_field(Some("pecial Report"), PASSES), "Special Report");
        // Already-correct words are left alone
        assert_eq!(
            clean_field(Some("Special Report"), PASSES),
            "Special Report"
        );
    }

    #[test]
    fn test_entities_and_attributes() {
        assert_eq!(
            clean_field(Some("NIST&nbsp;AI&amp;Framework"), PASSES),
            "NIST AI Framework"
        );
        assert_eq!(
            clean_field(Some(r#"<span class="big">OECD</span>"#), PASSES),
            "OECD"
        );
    }

    #[test]
    fn test_nested_fragments_need_multiple_passes() {
        // Stripping the inner tag exposes the outer one
        assert_eq!(clean_field(Some("<di<b>v>White House"), PASSES), "White House");
    }

    #[test]
    fn test_unsalvageable_returns_unknown() {
        assert_eq!(clean_field(Some("<div>"), PASSES), "Unknown");
        assert_eq!(clean_field(Some("a"), PASSES), "Unknown");
        assert_eq!(clean_field(Some("style= class="), PASSES), "Unknown");
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "</div>Special<div>Committee",
            "pecial Report",
            "NIST AI Risk Management Framework",
            "<p>European&nbsp;Commission</p>",
            "None",
            "a",
            "width=80 Department of Commerce",
            "The White House",
        ];
        for input in inputs {
            let once = clean_field(Some(input), PASSES);
            let twice = clean_field(Some(once.as_str()), PASSES);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_convergence_stops_early() {
        // A clean string is returned unchanged even with a huge pass budget
        assert_eq!(
            clean_field(Some("Quantum Policy Review"), 1000),
            "Quantum Policy Review"
        );
    }

    #[test]
    fn test_date_field() {
        assert_eq!(clean_date_field(None, PASSES), "Date not available");
        assert_eq!(clean_date_field(Some("<b></b>"), PASSES), "Date not available");
        assert_eq!(clean_date_field(Some("2023-01-26"), PASSES), "2023-01-26");
    }
}
