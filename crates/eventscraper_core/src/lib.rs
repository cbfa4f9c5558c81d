//! Core normalization logic for scraped event listings.
//! This crate turns raw backend records into display-ready events: date
//! labels, cleaned descriptions and placeholder artwork.

pub mod clean;
pub mod config;
pub mod date;
pub mod html;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod placeholder;

pub use clean::{
    classify_line, clean_description, NoiseReason, NormalizedDescription, FALLBACK_DESCRIPTION,
};
pub use config::{CleanerConfig, ConfigError};
pub use date::{interpret_date, interpret_date_with_year, DateLabel, DATE_TBA};
pub use html::{flatten_html, looks_like_html};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::event::Event;
pub use model::platform::{platform_label, Platform};
pub use pipeline::{
    event_image, normalize_description, normalize_event, normalize_event_with_year,
    normalize_events, normalize_events_on, BatchReport, NormalizedEvent,
};
pub use placeholder::{abbreviation, placeholder_hash, placeholder_image, placeholder_svg};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
