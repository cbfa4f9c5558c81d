//! Event domain model.
//!
//! # Responsibility
//! - Define the scraped event record consumed by normalization.
//! - Keep platform metadata (labels, site URLs) in one place.
//!
//! # Invariants
//! - Records are owned by the backend export; core code never mutates one
//!   in place.

pub mod event;
pub mod platform;
