//! Description cleaning for scraped event text.
//!
//! # Responsibility
//! - Drop boilerplate lines (links, CTAs, footers, navigation, dates,
//!   addresses, pricing) from flattened description text.
//! - Stop at the first section break once real content has been seen.
//! - Reshape the surviving lines into at most two short paragraphs.
//!
//! # Invariants
//! - Cleaning is pure; identical input yields identical output.
//! - At most `CleanerConfig::max_lines` lines survive.
//! - The result never holds more than two paragraphs, none of them empty.
//!
//! Rejected lines are logged at `trace` by reason and position only; line
//! content is never written to logs.

use crate::config::CleanerConfig;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// Sentence shown by callers when a description cleans down to nothing.
pub const FALLBACK_DESCRIPTION: &str =
    "No description available yet. Check back soon or visit the event website.";

const BULLET_GLYPHS: &[char] = &['•', '·', '●', '▪', '◦', '-', '–', '—', '*', '►', '➤', '✓'];

const LOCATION_WORD_MIN_CHARS: usize = 3;

const WEEKDAY: &str = r"(?:mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?)";
const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";
const DAY: &str = r"\d{1,2}(?:st|nd|rd|th)?";

/// Why a line was rejected by the cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    BareUrl,
    SocialLink,
    LongUrl,
    CallToAction,
    LegalBoilerplate,
    CallForProposals,
    StructuralLabel,
    UiChrome,
    DateOnly,
    Address,
    CityName,
    Pricing,
    SponsorLink,
    TooShort,
    NameRepetition,
    LocationRepetition,
}

impl NoiseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BareUrl => "bare_url",
            Self::SocialLink => "social_link",
            Self::LongUrl => "long_url",
            Self::CallToAction => "call_to_action",
            Self::LegalBoilerplate => "legal_boilerplate",
            Self::CallForProposals => "call_for_proposals",
            Self::StructuralLabel => "structural_label",
            Self::UiChrome => "ui_chrome",
            Self::DateOnly => "date_only",
            Self::Address => "address",
            Self::CityName => "city_name",
            Self::Pricing => "pricing",
            Self::SponsorLink => "sponsor_link",
            Self::TooShort => "too_short",
            Self::NameRepetition => "name_repetition",
            Self::LocationRepetition => "location_repetition",
        }
    }
}

impl Display for NoiseReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

struct NoiseRule {
    reason: NoiseReason,
    pattern: Regex,
    /// Rule only applies to lines at least this many chars long.
    min_chars: usize,
}

fn rule(reason: NoiseReason, pattern: &str) -> NoiseRule {
    NoiseRule {
        reason,
        pattern: Regex::new(pattern).expect("valid noise rule regex"),
        min_chars: 0,
    }
}

fn long_rule(reason: NoiseReason, pattern: &str, min_chars: usize) -> NoiseRule {
    NoiseRule {
        min_chars,
        ..rule(reason, pattern)
    }
}

// Evaluated in order; the first matching rule names the reason.
static NOISE_RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    use NoiseReason::*;
    // Remainder of a line made only of date/time tokens.
    let date_tail =
        format!(r"(?:[\s,@|:./\-–]|\d|(?:st|nd|rd|th|am|pm|to)\b|{WEEKDAY}\b|{MONTH}\b)*");
    vec![
        rule(BareUrl, r"(?i)^(?:https?://|www\.)\S+$"),
        rule(
            SocialLink,
            r"(?i)(?:^|[\s(/@])(?:www\.)?(?:facebook\.com|fb\.me|twitter\.com|x\.com|instagram\.com|linkedin\.com|youtube\.com|youtu\.be|t\.me|telegram\.me|chat\.whatsapp\.com|wa\.me|discord\.gg|discord\.com/invite|bit\.ly|linktr\.ee)\b",
        ),
        rule(LongUrl, r"(?i)https?://\S{40,}"),
        rule(
            CallToAction,
            r"(?i)^(?:sign\s*up|register|rsvp|buy\s+(?:your\s+)?tickets?|get\s+(?:your\s+)?tickets?|book\s+(?:now|your)|grab\s+your|click\s+here|read\s+more|learn\s+more|see\s+more|view\s+more|join\s+us|join\s+now|apply\s+now|follow\s+us|subscribe|share\s+(?:this|with)|don'?t\s+miss|hurry)\b",
        ),
        rule(
            LegalBoilerplate,
            r"(?i)copyright|©|\ball\s+rights\s+reserved\b|\bpowered\s+by\b|\bprivacy\s+policy\b|\bterms\s+(?:of\s+(?:use|service)|(?:and|&)\s+conditions)\b|\bcookie\s+policy\b",
        ),
        rule(
            CallForProposals,
            r"(?i)\bcall\s+for\s+(?:proposals|papers|speakers|talks)\b|\bsubmit\s+(?:a|your)\s+(?:talk|proposal|session|abstract)\b|\bcfp\b",
        ),
        rule(
            StructuralLabel,
            r"(?i)^(?:agenda|schedule|timeline|itinerary|venue|date|time|date\s*(?:&|and)\s*time|location|where|when|tags?|category|price|tickets?|speakers?|about(?:\s+(?:the\s+)?event)?|overview|highlights|details|description|faqs?)\s*:?\s*$",
        ),
        rule(
            UiChrome,
            r"(?i)^(?:home|menu|login|log\s*in|logout|log\s*out|sign\s*in|search|back|next|previous|prev|share|close|explore|events?|contact(?:\s+us)?|about\s+us|more|skip\s+to\s+content|loading\.*)$",
        ),
        rule(DateOnly, &format!(r"(?i)^{WEEKDAY}\b{date_tail}$")),
        rule(DateOnly, &format!(r"(?i)^{DAY}\s+{MONTH}\b{date_tail}$")),
        rule(DateOnly, r"(?i)^\d{4}-\d{2}-\d{2}(?:[T\s][\d:.+\-z]*)?$"),
        long_rule(Address, r"\b\d{6}\b", 30),
        long_rule(
            Address,
            r"(?i),\s*(?:india|usa|united\s+states|uk|united\s+kingdom|singapore|uae|united\s+arab\s+emirates|germany|canada|australia)\.?\s*$",
            30,
        ),
        rule(
            CityName,
            r"(?i)^(?:bengaluru|bangalore|mumbai|delhi|hyderabad|chennai|pune|kolkata|gurugram|gurgaon|noida|ahmedabad|kochi|jaipur|chandigarh|indore)\.?$",
        ),
        rule(Pricing, r"(?i)^(?:₹|rs\.?|inr|\$|usd|€|eur|£|gbp)\s*\d"),
        rule(SponsorLink, r"(?i)^\d+\s*[.):\-]\s*.*(?:https?://|www\.)"),
    ]
});

static SECTION_BREAK_RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:event\s+|the\s+|detailed\s+|tentative\s+)?(?:agenda|schedule|itinerary|programme)\s*(?:for\s+the\s+day|of\s+the\s+day|overview)?\s*:?\s*$",
        r"(?i)^join\s+(?:the|our)\s+(?:\w+\s+)?community\b",
        r"(?i)^(?:call\s+for\s+(?:proposals|papers|speakers|talks)|cfp)\b",
        r"(?i)^(?:our\s+|meet\s+(?:the\s+|our\s+)?|featured\s+|keynote\s+)?(?:speakers?|organi[sz]ers?|hosts?|panelists?|mentors?)\s*:?\s*$",
        r"(?i)^(?:join|follow)\s+(?:us\s+|our\s+)?(?:on\s+)?(?:\w+\s+)?(?:whatsapp|telegram|discord|slack)\b",
        r"(?i)^(?:whatsapp|telegram|discord|slack)\s+(?:group|channel|community|server)\b",
        r"(?i)^\d+\s*[.)]\s*(?:https?://|www\.)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid section break regex"))
    .collect()
});

/// Cleaned description: zero, one or two paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedDescription {
    paragraphs: Vec<String>,
}

impl NormalizedDescription {
    /// Splits kept lines in half (first half rounds up) and joins each half
    /// with spaces. Empty halves are omitted.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self::default();
        }
        let split = (lines.len() + 1) / 2;
        let paragraphs = [lines[..split].join(" "), lines[split..].join(" ")]
            .into_iter()
            .filter(|paragraph| !paragraph.is_empty())
            .collect();
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    pub fn into_paragraphs(self) -> Vec<String> {
        self.paragraphs
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Paragraphs joined with `\n`.
    pub fn to_text(&self) -> String {
        self.paragraphs.join("\n")
    }

    /// Paragraphs, or the generic fallback sentence when nothing survived.
    pub fn or_fallback(&self) -> Vec<String> {
        if self.is_empty() {
            vec![FALLBACK_DESCRIPTION.to_string()]
        } else {
            self.paragraphs.clone()
        }
    }
}

/// Cleans flattened description text for one event.
///
/// `name` and `location` are the event's own fields; lines that mostly
/// repeat them are dropped.
pub fn clean_description(
    text: &str,
    name: &str,
    location: &str,
    config: &CleanerConfig,
) -> NormalizedDescription {
    let context = LineContext::new(name, location, config);
    let mut kept: Vec<String> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = strip_bullets(raw_line);
        if line.is_empty() {
            continue;
        }

        if is_section_break(line) {
            if kept.is_empty() {
                trace!(
                    "event=description_line_dropped module=clean line={index} reason=section_break"
                );
                continue;
            }
            debug!(
                "event=description_section_break module=clean line={index} kept={}",
                kept.len()
            );
            break;
        }

        if let Some(reason) = context.classify(line) {
            trace!(
                "event=description_line_dropped module=clean line={index} reason={reason} chars={}",
                line.chars().count()
            );
            continue;
        }

        kept.push(line.to_string());
        if kept.len() >= config.max_lines {
            break;
        }
    }

    NormalizedDescription::from_lines(kept)
}

/// Returns the rule that rejects `line` for an event, or `None` when the
/// line is kept. Leading bullet glyphs are ignored.
pub fn classify_line(
    line: &str,
    name: &str,
    location: &str,
    config: &CleanerConfig,
) -> Option<NoiseReason> {
    LineContext::new(name, location, config).classify(strip_bullets(line))
}

/// Returns whether `line` marks the start of a trailing section (agenda,
/// speakers, community invites, numbered link lists).
pub fn is_section_break(line: &str) -> bool {
    let line = strip_bullets(line);
    SECTION_BREAK_RULES
        .iter()
        .any(|pattern| pattern.is_match(line))
}

/// Strips leading bullet glyphs and surrounding whitespace.
pub fn strip_bullets(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| BULLET_GLYPHS.contains(&c) || c.is_whitespace())
        .trim_end()
}

struct LineContext<'a> {
    name_words: BTreeSet<String>,
    location_words: BTreeSet<String>,
    config: &'a CleanerConfig,
}

impl<'a> LineContext<'a> {
    fn new(name: &str, location: &str, config: &'a CleanerConfig) -> Self {
        Self {
            name_words: words(name, config.name_word_min_chars),
            location_words: words(location, LOCATION_WORD_MIN_CHARS),
            config,
        }
    }

    fn classify(&self, line: &str) -> Option<NoiseReason> {
        let chars = line.chars().count();

        if let Some(noise) = NOISE_RULES
            .iter()
            .find(|noise| chars >= noise.min_chars && noise.pattern.is_match(line))
        {
            return Some(noise.reason);
        }
        if chars < self.config.min_line_chars {
            return Some(NoiseReason::TooShort);
        }
        if self.name_overlap(line) > self.config.name_overlap_ratio {
            return Some(NoiseReason::NameRepetition);
        }
        if chars < self.config.location_line_max_chars
            && self.shared_location_words(line) >= self.config.location_shared_words
        {
            return Some(NoiseReason::LocationRepetition);
        }
        None
    }

    /// Share of the line's significant words that also occur in the name.
    fn name_overlap(&self, line: &str) -> f64 {
        if self.name_words.is_empty() {
            return 0.0;
        }
        let line_words = words(line, self.config.name_word_min_chars);
        if line_words.is_empty() {
            return 0.0;
        }
        let shared = line_words.intersection(&self.name_words).count();
        shared as f64 / line_words.len() as f64
    }

    fn shared_location_words(&self, line: &str) -> usize {
        if self.location_words.is_empty() {
            return 0;
        }
        let line_words = words(line, 1);
        self.location_words.intersection(&line_words).count()
    }
}

fn words(text: &str, min_chars: usize) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= min_chars)
        .map(str::to_lowercase)
        .collect()
}
