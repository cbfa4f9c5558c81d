//! HTML-to-text flattening for scraped descriptions.
//!
//! # Responsibility
//! - Detect whether a description carries markup.
//! - Flatten markup into line-oriented plain text, keeping block boundaries
//!   as line breaks.
//!
//! # Invariants
//! - Non-HTML input is only trimmed.
//! - Output never contains more than one consecutive blank line.

use once_cell::sync::Lazy;
use regex::Regex;

static OPENING_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>").expect("valid opening tag regex")
});
static SCRIPT_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script block regex")
});
static STYLE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid style block regex")
});
static BLOCK_CLOSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|li|div|h[1-6]|tr)\s*>").expect("valid block close regex")
});
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break regex"));
static ANY_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t\r]*\n(?:[ \t\r]*\n)+").expect("valid blank run regex")
});

// `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Returns whether `text` contains something shaped like an opening tag.
pub fn looks_like_html(text: &str) -> bool {
    OPENING_TAG_RE.is_match(text)
}

/// Flattens an HTML snippet into plain text with one block per line.
///
/// Input that does not look like HTML is returned trimmed.
pub fn flatten_html(text: &str) -> String {
    if !looks_like_html(text) {
        return text.trim().to_string();
    }

    let without_scripts = SCRIPT_BLOCK_RE.replace_all(text, "");
    let without_styles = STYLE_BLOCK_RE.replace_all(&without_scripts, "");
    let with_block_breaks = BLOCK_CLOSE_RE.replace_all(&without_styles, "\n");
    let with_line_breaks = LINE_BREAK_RE.replace_all(&with_block_breaks, "\n");
    let without_tags = ANY_TAG_RE.replace_all(&with_line_breaks, "");
    let decoded = decode_entities(&without_tags);
    let collapsed = BLANK_RUN_RE.replace_all(&decoded, "\n\n");
    collapsed.trim().to_string()
}

fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, plain)| acc.replace(entity, plain))
}
