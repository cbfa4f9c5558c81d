//! Deterministic placeholder artwork for events without an image.
//!
//! # Responsibility
//! - Derive a stable 32-bit hash, two hues and an abbreviation from an
//!   event's `(id, name)`.
//! - Render a gradient SVG and encode it as an embeddable data URI.
//!
//! # Invariants
//! - Output is a pure function of `(id, name)`: byte-identical across calls,
//!   processes and platforms.
//! - Hash arithmetic is explicit `u32` wrapping arithmetic.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const HASH_SEED_MULTIPLIER: u32 = 2_654_435_761;
const HUE_OFFSET: u32 = 40;
const FALLBACK_ABBREVIATION: &str = "EV";
const DATA_URI_PREFIX: &str = "data:image/svg+xml;charset=utf-8,";

// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Rolling hash over the UTF-16 code units of `name`, seeded from `id`.
///
/// `seed = id * 2654435761 mod 2^32`, then `hash = hash * 31 + unit` per
/// code unit, all modulo `2^32`.
pub fn placeholder_hash(id: i64, name: &str) -> u32 {
    // Truncation keeps `id mod 2^32`, which is all the product depends on.
    let seed = (id as u32).wrapping_mul(HASH_SEED_MULTIPLIER);
    name.encode_utf16().fold(seed, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(u32::from(unit))
    })
}

/// Two-letter watermark for an event name.
///
/// First letters of the first two words when the name has at least two
/// words, else the first two characters uppercased, else `EV`.
pub fn abbreviation(name: &str) -> String {
    let mut words = name.split_whitespace();
    if let (Some(first), Some(second)) = (words.next(), words.next()) {
        return [first, second]
            .iter()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
    }

    let leading: String = name.chars().take(2).collect();
    if leading.is_empty() {
        FALLBACK_ABBREVIATION.to_string()
    } else {
        leading.to_uppercase()
    }
}

/// Renders the placeholder SVG for an event.
pub fn placeholder_svg(id: i64, name: &str) -> String {
    let hash = placeholder_hash(id, name);
    let hue = hash % 360;
    let second_hue = (hue + HUE_OFFSET) % 360;
    let start = format!("hsl({hue},55%,28%)");
    let end = format!("hsl({second_hue},60%,18%)");
    let accent = format!("hsl({hue},70%,75%)");
    let abbreviation = abbreviation(name);
    let label = html_escape::encode_text(&abbreviation);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="160" viewBox="0 0 400 160">
  <defs>
    <linearGradient id="g" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%"   stop-color="{start}"/>
      <stop offset="100%" stop-color="{end}"/>
    </linearGradient>
    <filter id="b"><feGaussianBlur stdDeviation="18"/></filter>
  </defs>
  <rect width="400" height="160" fill="url(#g)"/>
  <circle cx="320" cy="30"  r="90" fill="{accent}" opacity="0.12" filter="url(#b)"/>
  <circle cx="60"  cy="140" r="70" fill="{accent}" opacity="0.10" filter="url(#b)"/>
  <text x="200" y="115" text-anchor="middle" font-family="Georgia,serif"
        font-size="90" font-weight="700" fill="white" opacity="0.07">{label}</text>
  <text x="200" y="97"  text-anchor="middle" font-family="Georgia,serif"
        font-size="38" font-weight="600" fill="white" opacity="0.55">{label}</text>
</svg>"##
    )
}

/// Placeholder SVG encoded as a `data:` URI usable directly as an image source.
pub fn placeholder_image(id: i64, name: &str) -> String {
    let svg = placeholder_svg(id, name);
    format!(
        "{DATA_URI_PREFIX}{}",
        utf8_percent_encode(svg.trim(), URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::{abbreviation, placeholder_hash, placeholder_image, placeholder_svg};

    #[test]
    fn output_is_byte_identical_across_calls() {
        assert_eq!(
            placeholder_image(42, "India Tech Founders Summit 2025"),
            placeholder_image(42, "India Tech Founders Summit 2025")
        );
    }

    #[test]
    fn different_identity_changes_output() {
        assert_ne!(
            placeholder_image(1, "Rust Meetup"),
            placeholder_image(2, "Rust Meetup")
        );
    }

    #[test]
    fn hash_matches_wrapping_reference_values() {
        assert_eq!(placeholder_hash(0, ""), 0);
        assert_eq!(placeholder_hash(1, ""), 2_654_435_761);
        assert_eq!(placeholder_hash(2, ""), 1_013_904_226);
        assert_eq!(placeholder_hash(0, "A"), 65);
        assert_eq!(placeholder_hash(0, "AB"), 65 * 31 + 66);
        assert_eq!(
            placeholder_hash(1, "A"),
            2_654_435_761_u32.wrapping_mul(31).wrapping_add(65)
        );
    }

    #[test]
    fn abbreviation_rules() {
        assert_eq!(abbreviation("React India Conf"), "RI");
        assert_eq!(abbreviation("rustconf"), "RU");
        assert_eq!(abbreviation("x"), "X");
        assert_eq!(abbreviation(""), "EV");
    }

    #[test]
    fn empty_name_still_renders() {
        let svg = placeholder_svg(1, "");
        assert!(svg.contains(">EV</text>"));
        // 2654435761 % 360 = 241; (241 + 40) % 360 = 281
        assert!(svg.contains("stop-color=\"hsl(241,55%,28%)\""));
        assert!(svg.contains("stop-color=\"hsl(281,60%,18%)\""));
        assert!(svg.contains("fill=\"hsl(241,70%,75%)\""));
    }

    #[test]
    fn data_uri_is_percent_encoded_like_uri_components() {
        let uri = placeholder_image(7, "Go Meetup");
        assert!(uri.starts_with("data:image/svg+xml;charset=utf-8,%3Csvg%20xmlns%3D%22http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg%22"));
        assert!(uri.contains("hsl("));
        assert!(uri.contains("%25%2C"));
        assert!(!uri.contains(' '));
        assert!(!uri.contains('<'));
        assert!(!uri.contains('\n'));
    }

    #[test]
    fn abbreviation_is_escaped_inside_markup() {
        let svg = placeholder_svg(3, "<b");
        assert!(svg.contains(">&lt;B</text>"));
        let svg = placeholder_svg(3, "&b");
        assert!(svg.contains(">&amp;B</text>"));
    }
}
