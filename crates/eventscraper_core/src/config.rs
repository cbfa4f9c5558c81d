//! Tunable thresholds for description cleaning.
//!
//! # Responsibility
//! - Hold the heuristic constants used by [`crate::clean`].
//! - Validate externally supplied values before they reach the cleaner.
//!
//! # Invariants
//! - `CleanerConfig::default()` always validates.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lines shorter than this (in chars) are treated as content-free fragments.
pub const DEFAULT_MIN_LINE_CHARS: usize = 20;
/// Hard cap on kept description lines.
pub const DEFAULT_MAX_LINES: usize = 7;
/// Share of a line's significant words that may repeat the event name.
pub const DEFAULT_NAME_OVERLAP_RATIO: f64 = 0.6;
/// Minimum chars for a word to count toward name overlap.
pub const DEFAULT_NAME_WORD_MIN_CHARS: usize = 4;
/// Shared location words that mark a short line as location repetition.
pub const DEFAULT_LOCATION_SHARED_WORDS: usize = 2;
/// Lines at or above this length are never dropped for location repetition.
pub const DEFAULT_LOCATION_LINE_MAX_CHARS: usize = 130;

/// Heuristic thresholds for the description cleaner.
///
/// Missing fields fall back to the defaults when deserialized, so a config
/// file only needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    pub min_line_chars: usize,
    pub max_lines: usize,
    /// A line is dropped when strictly more than this share of its words
    /// also appear in the event name.
    pub name_overlap_ratio: f64,
    pub name_word_min_chars: usize,
    pub location_shared_words: usize,
    pub location_line_max_chars: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            min_line_chars: DEFAULT_MIN_LINE_CHARS,
            max_lines: DEFAULT_MAX_LINES,
            name_overlap_ratio: DEFAULT_NAME_OVERLAP_RATIO,
            name_word_min_chars: DEFAULT_NAME_WORD_MIN_CHARS,
            location_shared_words: DEFAULT_LOCATION_SHARED_WORDS,
            location_line_max_chars: DEFAULT_LOCATION_LINE_MAX_CHARS,
        }
    }
}

impl CleanerConfig {
    /// Validates threshold ranges.
    ///
    /// # Errors
    /// - `max_lines`, `location_shared_words` or `name_word_min_chars` is zero.
    /// - `name_overlap_ratio` is outside `(0, 1]` or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lines == 0 {
            return Err(ConfigError::ZeroValue("max_lines"));
        }
        if self.location_shared_words == 0 {
            return Err(ConfigError::ZeroValue("location_shared_words"));
        }
        if self.name_word_min_chars == 0 {
            return Err(ConfigError::ZeroValue("name_word_min_chars"));
        }
        if !self.name_overlap_ratio.is_finite()
            || self.name_overlap_ratio <= 0.0
            || self.name_overlap_ratio > 1.0
        {
            return Err(ConfigError::RatioOutOfRange {
                field: "name_overlap_ratio",
                value: self.name_overlap_ratio,
            });
        }
        Ok(())
    }

    /// Consumes the config and returns it when valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }
}

/// Cleaner configuration validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    ZeroValue(&'static str),
    RatioOutOfRange { field: &'static str, value: f64 },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroValue(field) => write!(f, "cleaner config `{field}` must be greater than 0"),
            Self::RatioOutOfRange { field, value } => write!(
                f,
                "cleaner config `{field}` must be within (0, 1], got {value}"
            ),
        }
    }
}

impl Error for ConfigError {}
