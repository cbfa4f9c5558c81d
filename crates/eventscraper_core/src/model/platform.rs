//! Known listing platforms and their display metadata.

use serde::{Deserialize, Serialize};

/// Source platform an event was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    AllEvents,
    HasGeek,
    Meetup,
    Townscript,
    Biec,
    Echai,
    Hitex,
}

const ALL_PLATFORMS: [Platform; 7] = [
    Platform::AllEvents,
    Platform::HasGeek,
    Platform::Meetup,
    Platform::Townscript,
    Platform::Biec,
    Platform::Echai,
    Platform::Hitex,
];

impl Platform {
    /// Every supported platform, in display order.
    pub fn all() -> &'static [Platform] {
        &ALL_PLATFORMS
    }

    /// Parses a backend platform tag (case-insensitive, trimmed).
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|platform| platform.tag() == tag)
    }

    /// Backend tag, e.g. `allevents`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::AllEvents => "allevents",
            Self::HasGeek => "hasgeek",
            Self::Meetup => "meetup",
            Self::Townscript => "townscript",
            Self::Biec => "biec",
            Self::Echai => "echai",
            Self::Hitex => "hitex",
        }
    }

    /// Human-facing name, e.g. `AllEvents`.
    pub fn label(self) -> &'static str {
        match self {
            Self::AllEvents => "AllEvents",
            Self::HasGeek => "HasGeek",
            Self::Meetup => "Meetup",
            Self::Townscript => "Townscript",
            Self::Biec => "BIEC",
            Self::Echai => "Echai",
            Self::Hitex => "Hitex",
        }
    }

    /// Home page of the platform.
    pub fn site_url(self) -> &'static str {
        match self {
            Self::AllEvents => "https://allevents.in",
            Self::HasGeek => "https://hasgeek.com",
            Self::Meetup => "https://meetup.com",
            Self::Townscript => "https://townscript.com",
            Self::Biec => "https://www.biecexpo.com",
            Self::Echai => "https://echai.ventures",
            Self::Hitex => "https://hitex.co.in",
        }
    }
}

/// Display label for a raw platform tag; unknown tags are shown as-is.
pub fn platform_label(tag: &str) -> String {
    Platform::parse(tag).map_or_else(
        || tag.trim().to_string(),
        |platform| platform.label().to_string(),
    )
}
