use eventscraper_core::{platform_label, Event, Platform};

#[test]
fn event_deserializes_backend_export() {
    let json = r#"{
        "id": 7,
        "event_name": "Cloud Native Bengaluru",
        "location": "Bengaluru",
        "date_time": "2026-03-05T09:00:00+05:30",
        "platform": "hasgeek",
        "image_url": null,
        "extra_field": "ignored"
    }"#;

    let event: Event = serde_json::from_str(json).unwrap();
    assert_eq!(event.id, 7);
    assert_eq!(event.name, "Cloud Native Bengaluru");
    assert_eq!(event.date, "");
    assert_eq!(event.raw_date(), Some("2026-03-05T09:00:00+05:30"));
    assert_eq!(event.description, "");
    assert_eq!(event.image_url, None);
    assert_eq!(event.known_platform(), Some(Platform::HasGeek));
}

#[test]
fn event_serialization_uses_expected_wire_fields() {
    let event = Event::new(3, "Design Jam", "meetup");
    let json = serde_json::to_value(&event).unwrap();

    assert_eq!(json["event_name"], "Design Jam");
    assert_eq!(json["platform"], "meetup");
    assert!(json.get("name").is_none());
    assert!(json["image_url"].is_null());
}

#[test]
fn unknown_platform_tags_pass_through() {
    let event = Event::new(1, "Ruby Conf", "eventbrite");
    assert_eq!(event.known_platform(), None);
    assert_eq!(platform_label(&event.platform), "eventbrite");
    assert_eq!(Platform::Echai.site_url(), "https://echai.ventures");
}
