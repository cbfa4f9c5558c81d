//! Event normalization pipeline.
//!
//! # Responsibility
//! - Compose date interpretation, HTML flattening, description cleaning and
//!   placeholder synthesis into one display-ready projection per event.
//! - Normalize batches: drop invalid, past and online events, then
//!   de-duplicate.
//!
//! # Invariants
//! - Source events are never mutated.
//! - Batch output keeps input order; the first of a duplicate set wins.
//! - Duplicate keys are computed on normalized records.

use crate::clean::{clean_description, NormalizedDescription};
use crate::config::CleanerConfig;
use crate::date::interpret_date_with_year;
use crate::html::{flatten_html, looks_like_html};
use crate::model::event::Event;
use crate::model::platform::platform_label;
use crate::placeholder::placeholder_image;
use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// Display-ready projection of one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEvent {
    pub id: i64,
    pub name: String,
    /// Short canonical label, e.g. `Feb 21, 2026`.
    pub date_label: String,
    /// Zero to two cleaned paragraphs.
    pub paragraphs: Vec<String>,
    /// Real image URL, or a placeholder data URI.
    pub image: String,
    pub has_real_image: bool,
    pub platform_label: String,
    /// Listing platform home page, or the event's own website for unknown
    /// platforms. Empty when neither is known.
    pub platform_url: String,
    pub is_offline: bool,
}

/// Result of normalizing a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub events: Vec<NormalizedEvent>,
    /// Number of input records.
    pub total: usize,
    /// Records missing a name or platform.
    pub skipped_invalid: usize,
    /// Records whose resolved date is before today.
    pub skipped_past: usize,
    /// Records detected as online events.
    pub skipped_online: usize,
    /// Records whose dedup key was already seen.
    pub duplicates: usize,
}

/// Flattens (when HTML) and cleans a raw description.
pub fn normalize_description(
    raw: &str,
    name: &str,
    location: &str,
    config: &CleanerConfig,
) -> NormalizedDescription {
    let text = if looks_like_html(raw) {
        flatten_html(raw)
    } else {
        raw.trim().to_string()
    };
    clean_description(&text, name, location, config)
}

/// Image source for an event: its real URL when present, else the placeholder.
///
/// The placeholder is seeded from the name exactly as stored on the record.
pub fn event_image(event: &Event) -> String {
    event
        .real_image()
        .map_or_else(|| placeholder_image(event.id, &event.name), str::to_string)
}

/// Normalizes one event using the current UTC year for year-less dates.
pub fn normalize_event(event: &Event, config: &CleanerConfig) -> NormalizedEvent {
    normalize_event_with_year(event, config, Utc::now().year())
}

/// Normalizes one event with an explicit fallback year.
pub fn normalize_event_with_year(
    event: &Event,
    config: &CleanerConfig,
    fallback_year: i32,
) -> NormalizedEvent {
    let image = event_image(event);
    let event = event.normalized();
    let description =
        normalize_description(&event.description, &event.name, &event.location, config);

    NormalizedEvent {
        id: event.id,
        date_label: interpret_date_with_year(event.raw_date(), fallback_year).short(),
        paragraphs: description.into_paragraphs(),
        image,
        has_real_image: event.real_image().is_some(),
        platform_label: platform_label(&event.platform),
        platform_url: platform_url(&event),
        is_offline: event.is_offline(),
        name: event.name,
    }
}

fn platform_url(event: &Event) -> String {
    match event.known_platform() {
        Some(platform) => platform.site_url().to_string(),
        None => event.website.clone(),
    }
}

/// Normalizes a batch as of the current UTC day.
pub fn normalize_events(events: &[Event], config: &CleanerConfig) -> BatchReport {
    normalize_events_on(events, config, Utc::now().date_naive())
}

/// Normalizes a batch as of `today`.
///
/// Records are dropped, in this order, when they miss a name or platform,
/// resolve to a date before `today`, look like online events, or repeat an
/// earlier record's dedup key. Unreadable dates are kept.
pub fn normalize_events_on(
    events: &[Event],
    config: &CleanerConfig,
    today: NaiveDate,
) -> BatchReport {
    let fallback_year = today.year();
    let mut seen = HashSet::new();
    let mut report = BatchReport {
        total: events.len(),
        ..BatchReport::default()
    };

    for event in events {
        if !event.is_valid() {
            debug!(
                "event=normalize_skip module=pipeline id={} reason=invalid",
                event.id
            );
            report.skipped_invalid += 1;
            continue;
        }
        let normalized = event.normalized();
        let date = interpret_date_with_year(normalized.raw_date(), fallback_year);
        if !date.is_upcoming(today) {
            debug!(
                "event=normalize_skip module=pipeline id={} reason=past",
                event.id
            );
            report.skipped_past += 1;
            continue;
        }
        if !normalized.is_offline() {
            debug!(
                "event=normalize_skip module=pipeline id={} reason=online",
                event.id
            );
            report.skipped_online += 1;
            continue;
        }
        if !seen.insert(normalized.dedup_hash()) {
            debug!(
                "event=normalize_skip module=pipeline id={} reason=duplicate",
                event.id
            );
            report.duplicates += 1;
            continue;
        }
        report
            .events
            .push(normalize_event_with_year(event, config, fallback_year));
    }

    info!(
        "event=normalize_batch module=pipeline status=ok total={} kept={} duplicates={} skipped_invalid={} skipped_past={} skipped_online={}",
        report.total,
        report.events.len(),
        report.duplicates,
        report.skipped_invalid,
        report.skipped_past,
        report.skipped_online
    );
    report
}
