use eventscraper_core::{
    abbreviation, clean_description, flatten_html, interpret_date, normalize_event_with_year,
    normalize_events_on, placeholder_image, CleanerConfig, Event, DATE_TBA,
};
use chrono::NaiveDate;

const SUMMIT_DESCRIPTION: &str = "<p>Join us at this amazing summit!</p><p>Learn about funding, growth tactics, and networking opportunities in India's booming startup ecosystem from top speakers and investors.</p><p>Register now at example.com</p>";
const SUMMIT_BODY: &str = "Learn about funding, growth tactics, and networking opportunities in India's booming startup ecosystem from top speakers and investors.";

fn summit_event() -> Event {
    let mut event = Event::new(42, "India Tech Founders Summit 2025", "allevents");
    event.date = "2026-02-21".to_string();
    event.description = SUMMIT_DESCRIPTION.to_string();
    event
}

#[test]
fn summit_event_normalizes_end_to_end() {
    let event = summit_event();

    let flattened = flatten_html(&event.description);
    assert_eq!(flattened.lines().count(), 3);
    assert_eq!(flattened.lines().nth(1), Some(SUMMIT_BODY));

    let normalized = normalize_event_with_year(&event, &CleanerConfig::default(), 2025);
    assert_eq!(normalized.id, 42);
    assert_eq!(normalized.date_label, "Feb 21, 2026");
    assert_eq!(normalized.paragraphs, vec![SUMMIT_BODY.to_string()]);
    assert_eq!(normalized.platform_label, "AllEvents");
    assert!(!normalized.has_real_image);
    assert_eq!(normalized.image, placeholder_image(42, &event.name));
}

#[test]
fn iso_dates_are_timezone_invariant() {
    assert_eq!(interpret_date(Some("2026-02-21")).short(), "Feb 21, 2026");
    assert_eq!(interpret_date(Some("2026-01-01")).short(), "Jan 01, 2026");
    assert_eq!(interpret_date(Some("2025-12-31")).short(), "Dec 31, 2025");
}

#[test]
fn missing_and_unreadable_dates_degrade() {
    assert_eq!(interpret_date(None).short(), DATE_TBA);
    assert_eq!(interpret_date(Some("")).short(), DATE_TBA);
    assert_eq!(interpret_date(Some("whenever")).short(), "whenever");
}

#[test]
fn flattener_splits_blocks_and_decodes_entities() {
    assert_eq!(flatten_html("<p>Hello</p><p>World</p>"), "Hello\nWorld");
    assert_eq!(flatten_html("<b>A &amp; B</b>"), "A & B");
}

#[test]
fn cleaner_drops_lone_url_and_short_lines() {
    let config = CleanerConfig::default();
    assert!(clean_description("https://example.com/events/42", "", "", &config).is_empty());
    assert!(clean_description("Great event!", "", "", &config).is_empty());
}

#[test]
fn cleaner_output_is_bounded() {
    let text = (1..=20)
        .map(|n| format!("Session number {n} explores a different corner of the ecosystem."))
        .collect::<Vec<_>>()
        .join("\n");
    let cleaned = clean_description(&text, "", "", &CleanerConfig::default());

    assert_eq!(cleaned.paragraphs().len(), 2);
    let kept_sentences: usize = cleaned
        .paragraphs()
        .iter()
        .map(|paragraph| paragraph.matches("Session number").count())
        .sum();
    assert_eq!(kept_sentences, 7);
}

#[test]
fn placeholder_is_deterministic() {
    assert_eq!(
        placeholder_image(7, "React India Conf"),
        placeholder_image(7, "React India Conf")
    );
    assert_ne!(placeholder_image(7, "React India Conf"), placeholder_image(8, "React India Conf"));
    assert_eq!(abbreviation(""), "EV");
    assert_eq!(abbreviation("React India Conf"), "RI");
}

#[test]
fn batch_keeps_first_of_duplicates_in_order() {
    let mut repeat = summit_event();
    repeat.id = 43;
    repeat.image_url = Some("https://cdn.example.com/summit.png".to_string());
    let mut unrelated = Event::new(44, "Rust Pune Meetup", "meetup");
    unrelated.date = "14 Mar 2026".to_string();
    unrelated.location = "Pune".to_string();

    let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let report = normalize_events_on(
        &[summit_event(), repeat, Event::default(), unrelated],
        &CleanerConfig::default(),
        today,
    );

    assert_eq!(report.total, 4);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.skipped_invalid, 1);
    assert_eq!(report.skipped_past, 0);
    assert_eq!(report.skipped_online, 0);
    let labels: Vec<(i64, &str)> = report
        .events
        .iter()
        .map(|event| (event.id, event.date_label.as_str()))
        .collect();
    assert_eq!(labels, vec![(42, "Feb 21, 2026"), (44, "Mar 14, 2026")]);
}
