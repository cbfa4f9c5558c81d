//! Scraped event record.
//!
//! # Responsibility
//! - Define the wire shape of an event as exported by the listing backend.
//! - Provide field cleanup, online/offline detection and the
//!   duplicate-detection key.
//! - Batch callers hash `normalized()` records so a blank location and `N/A`
//!   compare equal.
//!
//! # Invariants
//! - Read-only helpers never mutate the record; `normalized` returns a copy.
//! - `dedup_hash` depends only on name, location, date and platform.

use crate::model::platform::Platform;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const ONLINE_INDICATORS: &[&str] = &["online", "virtual", "webinar", "web-based", "remote event"];
const MISSING_LOCATION: &str = "N/A";

/// Event record as produced by the scraping backend.
///
/// Unknown or missing JSON fields fall back to empty values so partial
/// exports still deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub id: i64,
    /// Serialized as `event_name` to match the backend export.
    #[serde(rename = "event_name")]
    pub name: String,
    pub location: String,
    pub address: String,
    /// Free-form date (ISO, range or prose). Preferred over `date_time`.
    pub date: String,
    pub date_time: String,
    pub time: String,
    pub website: String,
    /// Plain text or HTML.
    pub description: String,
    /// `Online` / `Offline`; may be empty before normalization.
    pub event_type: String,
    /// Source platform tag, e.g. `meetup`.
    pub platform: String,
    pub image_url: Option<String>,
}

impl Event {
    /// Creates a record with the identity fields set and everything else empty.
    pub fn new(id: i64, name: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            platform: platform.into(),
            ..Self::default()
        }
    }

    /// Effective raw date: `date` when non-empty, else `date_time`.
    pub fn raw_date(&self) -> Option<&str> {
        [self.date.as_str(), self.date_time.as_str()]
            .into_iter()
            .find(|value| !value.is_empty())
    }

    /// Real image URL, if one is set and non-blank.
    pub fn real_image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Known platform for this record, if the tag is recognized.
    pub fn known_platform(&self) -> Option<Platform> {
        Platform::parse(&self.platform)
    }

    /// Returns a copy with trimmed fields, a `N/A` location default and a
    /// detected `event_type`.
    pub fn normalized(&self) -> Self {
        let mut event = Self {
            id: self.id,
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            address: self.address.trim().to_string(),
            date: self.date.trim().to_string(),
            date_time: self.date_time.trim().to_string(),
            time: self.time.trim().to_string(),
            website: self.website.trim().to_string(),
            description: self.description.trim().to_string(),
            event_type: self.event_type.trim().to_string(),
            platform: self.platform.trim().to_string(),
            image_url: self.real_image().map(str::to_string),
        };

        if event.location.is_empty() {
            event.location = MISSING_LOCATION.to_string();
        }
        if event.event_type.is_empty() {
            let mentions_online = event.location.to_lowercase().contains("online")
                || event.address.to_lowercase().contains("online");
            event.event_type = if mentions_online { "Online" } else { "Offline" }.to_string();
        }
        event
    }

    /// Returns `false` when type, location or name indicate an online event.
    pub fn is_offline(&self) -> bool {
        let combined =
            format!("{} {} {}", self.event_type, self.location, self.name).to_lowercase();
        !ONLINE_INDICATORS
            .iter()
            .any(|indicator| combined.contains(indicator))
    }

    /// Minimum fields required to list an event.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.platform.trim().is_empty()
    }

    /// Lowercase hex SHA-256 of `name|location|date|platform`.
    ///
    /// Fields are trimmed and lowercased; the date is `date_time`, falling
    /// back to `date`.
    pub fn dedup_hash(&self) -> String {
        let normalize = |value: &str| value.trim().to_lowercase();
        let date = match normalize(&self.date_time) {
            value if value.is_empty() => normalize(&self.date),
            value => value,
        };
        let key = format!(
            "{}|{}|{}|{}",
            normalize(&self.name),
            normalize(&self.location),
            date,
            normalize(&self.platform)
        );
        hex::encode(Sha256::digest(key.as_bytes()))
    }
}
