/*!
 * Caption track XML parsing.
 *
 * Converts the proprietary XML body of a caption track request into an
 * ordered sequence of timed `Segment`s. The upstream XML is occasionally
 * malformed, so extraction is deliberately best-effort: whatever does not
 * match the expected `<text start dur>` shape is skipped, and a document
 * that matches nothing at all parses to an empty sequence rather than an
 * error. "No captions" and "corrupt captions" are therefore
 * indistinguishable to callers, which is inherent in this strategy.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Inline formatting tags kept when formatting preservation is requested.
/// Everything outside this set is stripped in both modes.
pub const FORMATTING_TAGS: &[&str] = &[
    "strong", // important
    "em",     // emphasized
    "b",      // bold
    "i",      // italic
    "mark",   // marked
    "small",  // smaller
    "del",    // deleted
    "ins",    // inserted
    "sub",    // subscript
    "sup",    // superscript
];

// Matches one <text ...>...</text> element, self-closing form included
static TEXT_NODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<text(\s[^>]*?)?(?:/>|>(.*?)</text>)"#).unwrap()
});

static START_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)start\s*=\s*"([^"]*)""#).unwrap()
});

static DUR_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)dur\s*=\s*"([^"]*)""#).unwrap()
});

// Any markup tag, for the strip-everything mode
static ANY_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

// A named tag (opening, closing, attributed or self-closing), for the
// allow-list mode; the tag name is the first capture
static NAMED_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?\s*([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap()
});

/// One timed unit of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Caption text, entity-decoded, with markup stripped or filtered
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// Display duration in seconds, 0.0 if the track does not specify one
    pub duration: f64,
}

/// Parse a caption track body into segments, in document order.
///
/// With `preserve_formatting` set, the tags in [`FORMATTING_TAGS`] survive
/// in the segment text (case-insensitively); every other tag is removed.
/// Without it, all markup is removed. Empty, whitespace-only or
/// unrecognizable input yields an empty vector.
pub fn parse(raw_xml: &str, preserve_formatting: bool) -> Vec<Segment> {
    if raw_xml.trim().is_empty() {
        return Vec::new();
    }

    TEXT_NODE_REGEX
        .captures_iter(raw_xml)
        .map(|caps| {
            let attributes = caps.get(1).map_or("", |m| m.as_str());
            let inner_xml = caps.get(2).map_or("", |m| m.as_str());
            let decoded = html_escape::decode_html_entities(inner_xml);

            Segment {
                text: filter_tags(&decoded, preserve_formatting),
                start: parse_attribute(attributes, &START_ATTR_REGEX),
                duration: parse_attribute(attributes, &DUR_ATTR_REGEX),
            }
        })
        .collect()
}

/// Extract a float attribute; absent or non-numeric values become 0.0
fn parse_attribute(attributes: &str, attr_regex: &Regex) -> f64 {
    attr_regex
        .captures(attributes)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn filter_tags(text: &str, preserve_formatting: bool) -> String {
    if preserve_formatting {
        // Decide per tag instead of in one pass so the allow-listed tags
        // are never consumed while their neighbors are stripped
        NAMED_TAG_REGEX
            .replace_all(text, |caps: &Captures| {
                if is_formatting_tag(&caps[1]) {
                    caps[0].to_string()
                } else {
                    String::new()
                }
            })
            .into_owned()
    } else {
        ANY_TAG_REGEX.replace_all(text, "").into_owned()
    }
}

fn is_formatting_tag(name: &str) -> bool {
    FORMATTING_TAGS
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(name))
}
