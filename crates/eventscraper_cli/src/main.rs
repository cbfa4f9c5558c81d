//! Command-line entry point for event normalization.
//!
//! # Responsibility
//! - Parse flags and dispatch to `eventscraper_core` transforms.
//! - Own all file and JSON I/O; the core crate stays pure.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventscraper_core::{
    default_log_level, init_logging, interpret_date, normalize_description, normalize_events,
    placeholder_image, CleanerConfig, Event,
};
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "eventscraper", version, about = "Normalize scraped event listings")]
struct Cli {
    /// trace|debug|info|warn|error (defaults by build mode)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize a JSON export of events
    Normalize {
        /// JSON array of events, or an object with an `events` array
        input: PathBuf,

        /// Cleaner thresholds as JSON
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        pretty: bool,
    },
    /// Print the display label for a raw date
    Date {
        raw: String,

        /// Print the long form, e.g. `Saturday, February 21, 2026`
        #[arg(long)]
        long: bool,
    },
    /// Flatten and clean a description file
    Clean {
        file: PathBuf,

        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value = "")]
        location: String,

        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the placeholder image data URI for an event
    Placeholder {
        #[arg(long)]
        id: i64,

        #[arg(long, default_value = "")]
        name: String,
    },
}

/// Accepted shapes of a `normalize` input file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EventsDocument {
    List(Vec<Event>),
    Envelope { events: Vec<Event> },
}

impl EventsDocument {
    fn into_events(self) -> Vec<Event> {
        match self {
            Self::List(events) | Self::Envelope { events } => events,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, cli.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let output = run(cli.command)?;
    println!("{output}");
    Ok(())
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Normalize {
            input,
            config,
            pretty,
        } => {
            let config = load_config(config.as_deref())?;
            let events = read_events(&input)?;
            let report = normalize_events(&events, &config);
            eprintln!(
                "total={} kept={} duplicates={} skipped_invalid={} skipped_past={} skipped_online={}",
                report.total,
                report.events.len(),
                report.duplicates,
                report.skipped_invalid,
                report.skipped_past,
                report.skipped_online
            );
            let json = if pretty {
                serde_json::to_string_pretty(&report.events)
            } else {
                serde_json::to_string(&report.events)
            };
            json.context("failed to serialize normalized events")
        }
        Command::Date { raw, long } => {
            let label = interpret_date(Some(&raw));
            Ok(if long { label.long() } else { label.short() })
        }
        Command::Clean {
            file,
            name,
            location,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let raw = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let description = normalize_description(&raw, &name, &location, &config);
            info!(
                "event=clean module=cli status=ok paragraphs={}",
                description.paragraphs().len()
            );
            Ok(description.or_fallback().join("\n\n"))
        }
        Command::Placeholder { id, name } => Ok(placeholder_image(id, &name)),
    }
}

fn read_events(path: &Path) -> Result<Vec<Event>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: EventsDocument = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse events from {}", path.display()))?;
    Ok(document.into_events())
}

fn load_config(path: Option<&Path>) -> Result<CleanerConfig> {
    let Some(path) = path else {
        return Ok(CleanerConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: CleanerConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config
        .validated()
        .with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{load_config, read_events, run, Cli, Command};
    use clap::Parser;
    use std::fs;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["eventscraper", "date", "2026-02-21", "--log-level", "warn"]);
        assert_eq!(cli.log_level.as_deref(), Some("warn"));
        assert!(matches!(cli.command, Command::Date { long: false, .. }));
    }

    #[test]
    fn date_command_prints_labels() {
        let short = run(Command::Date {
            raw: "2026-02-21".to_string(),
            long: false,
        })
        .expect("date should format");
        assert_eq!(short, "Feb 21, 2026");

        let long = run(Command::Date {
            raw: "2026-02-21".to_string(),
            long: true,
        })
        .expect("date should format");
        assert_eq!(long, "Saturday, February 21, 2026");
    }

    #[test]
    fn read_events_accepts_list_and_envelope() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let list = dir.path().join("list.json");
        let envelope = dir.path().join("envelope.json");
        fs::write(&list, r#"[{"id": 1, "event_name": "A", "platform": "meetup"}]"#)
            .expect("write list");
        fs::write(
            &envelope,
            r#"{"events": [{"id": 2, "event_name": "B"}, {"id": 3}]}"#,
        )
        .expect("write envelope");

        assert_eq!(read_events(&list).expect("list should parse").len(), 1);
        let events = read_events(&envelope).expect("envelope should parse");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "B");
    }

    #[test]
    fn load_config_defaults_and_validates() {
        let defaults = load_config(None).expect("defaults should load");
        assert_eq!(defaults.max_lines, 7);

        let dir = tempfile::tempdir().expect("temp dir should be created");
        let partial = dir.path().join("partial.json");
        fs::write(&partial, r#"{"max_lines": 3}"#).expect("write config");
        let config = load_config(Some(&partial)).expect("partial config should load");
        assert_eq!(config.max_lines, 3);
        assert_eq!(config.min_line_chars, 20);

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"name_overlap_ratio": 1.5}"#).expect("write config");
        assert!(load_config(Some(&invalid)).is_err());
    }

    #[test]
    fn placeholder_command_prints_data_uri() {
        let uri = run(Command::Placeholder {
            id: 1,
            name: "Rust Meetup".to_string(),
        })
        .expect("placeholder should render");
        assert!(uri.starts_with("data:image/svg+xml;charset=utf-8,"));
    }
}
