//! Unit tests for the bookmark data types: wire format, identity, form validation.

use rstest::rstest;
use serde_json::json;

use sheetmarks::types::bookmark::{
    BookmarkRecord, BookmarkType, FormInput, Priority, RecordId, RecordKey,
};
use sheetmarks::types::errors::EditorError;
use sheetmarks::types::suggestion::Suggestion;

#[test]
fn test_record_deserializes_from_store_row() {
    let row = json!({"id": "a1", "bookmark": "http://x.com", "type": "python", "priority": "urgent"});
    let record: BookmarkRecord = serde_json::from_value(row).unwrap();
    assert_eq!(record.id.as_deref(), Some("a1"));
    assert_eq!(record.kind, BookmarkType::Python);
    assert_eq!(record.priority, Priority::Urgent);
}

#[test]
fn test_record_serializes_wire_names() {
    let record = BookmarkRecord {
        id: Some("b2".to_string()),
        bookmark: "https://example.com".to_string(),
        kind: BookmarkType::Javascript,
        priority: Priority::NotSo,
    };
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({"id": "b2", "bookmark": "https://example.com", "type": "javascript", "priority": "not-so"})
    );
}

#[test]
fn test_odd_cells_decode_without_failing_the_listing() {
    let rows = json!([
        {"id": "a1", "bookmark": "http://x.com", "type": "python", "priority": "urgent"},
        {"id": "b2", "bookmark": "http://rust-lang.org", "type": "Rust", "priority": ""},
        {"id": "c3", "bookmark": "http://half.row"}
    ]);
    let records: Vec<BookmarkRecord> = serde_json::from_value(rows).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].kind, BookmarkType::Python);
    assert_eq!(records[1].kind, BookmarkType::Unrecognized("Rust".to_string()));
    assert_eq!(records[1].priority, Priority::Unrecognized(String::new()));
    assert_eq!(records[2].kind, BookmarkType::default());
}

#[test]
fn test_unrecognized_values_round_trip_unchanged() {
    let row = json!({"id": "b2", "bookmark": "x", "type": "Rust", "priority": "someday"});
    let record: BookmarkRecord = serde_json::from_value(row.clone()).unwrap();
    assert_eq!(serde_json::to_value(&record).unwrap(), row);
    assert_eq!(record.kind.label(), "Rust");
}

#[test]
fn test_unrecognized_row_still_matches_search() {
    let record: BookmarkRecord = serde_json::from_value(
        json!({"id": "b2", "bookmark": "x", "type": "Rust", "priority": "Someday"}),
    )
    .unwrap();
    assert!(record.matches("rust"));
    assert!(record.matches("someday"));
}

#[test]
fn test_editing_unrecognized_row_requires_a_known_type() {
    let record: BookmarkRecord = serde_json::from_value(
        json!({"id": "b2", "bookmark": "x", "type": "Rust", "priority": "urgent"}),
    )
    .unwrap();
    let form = FormInput::from_record(&record);

    assert_eq!(BookmarkType::parse("Rust"), None);
    assert!(matches!(form.validate(), Err(EditorError::InvalidValue(_))));
}

#[test]
fn test_picker_options_list_known_values() {
    let types = BookmarkType::options();
    assert_eq!(types.len(), 6);
    assert_eq!(types[2].value, "javascript");
    assert_eq!(types[2].label, "JavaScript");

    let priorities: Vec<(String, String)> = Priority::options()
        .into_iter()
        .map(|o| (o.value, o.label))
        .collect();
    assert_eq!(
        priorities,
        vec![
            ("important".to_string(), "Important".to_string()),
            ("not-so".to_string(), "Not-so".to_string()),
            ("urgent".to_string(), "Now".to_string()),
        ]
    );
}

#[rstest]
#[case(json!({"bookmark": "http://x.com", "type": "java", "priority": "important"}))]
#[case(json!({"id": "", "bookmark": "http://x.com", "type": "java", "priority": "important"}))]
fn test_missing_or_empty_id_falls_back_to_display_key(#[case] row: serde_json::Value) {
    let record: BookmarkRecord = serde_json::from_value(row).unwrap();
    assert_eq!(record.key(), RecordKey::DisplayOnly("http://x.com".to_string()));
    assert!(record.key().record_id().is_none());
    assert!(record.record_id().is_none());
}

#[test]
fn test_stable_key_exposes_record_id() {
    let record: BookmarkRecord = serde_json::from_value(
        json!({"id": "a1", "bookmark": "http://x.com", "type": "java", "priority": "important"}),
    )
    .unwrap();
    assert_eq!(record.key().record_id(), RecordId::new("a1").as_ref());
}

#[test]
fn test_record_id_rejects_empty() {
    assert!(RecordId::new("").is_none());
    assert_ne!(RecordId::generate(), RecordId::generate());
}

#[rstest]
#[case(BookmarkType::Javascript, "javascript", "JavaScript")]
#[case(BookmarkType::Typescript, "typescript", "TypeScript")]
#[case(BookmarkType::Other, "other", "Other")]
fn test_type_wire_and_label(#[case] kind: BookmarkType, #[case] wire: &str, #[case] label: &str) {
    assert_eq!(kind.as_str(), wire);
    assert_eq!(kind.label(), label);
    assert_eq!(BookmarkType::parse(wire), Some(kind));
}

#[rstest]
#[case(Priority::Important, "important", "Important")]
#[case(Priority::NotSo, "not-so", "Not-so")]
#[case(Priority::Urgent, "urgent", "Now")]
fn test_priority_wire_and_label(#[case] priority: Priority, #[case] wire: &str, #[case] label: &str) {
    assert_eq!(priority.as_str(), wire);
    assert_eq!(priority.label(), label);
    assert_eq!(Priority::parse(wire), Some(priority));
}

#[rstest]
#[case(FormInput::default(), "Please enter your Bookmark Name!")]
#[case(FormInput { bookmark: Some("   ".into()), ..FormInput::default() }, "Please enter your Bookmark Name!")]
#[case(FormInput { bookmark: Some("x".into()), ..FormInput::default() }, "Please enter Bookmark Type")]
#[case(FormInput { bookmark: Some("x".into()), kind: Some("java".into()), priority: None }, "Please enter Priority")]
fn test_required_fields(#[case] input: FormInput, #[case] prompt: &str) {
    assert_eq!(input.validate(), Err(EditorError::MissingField(prompt.to_string())));
}

#[test]
fn test_invalid_enum_values() {
    let input = FormInput {
        bookmark: Some("x".into()),
        kind: Some("Python".into()),
        priority: Some("urgent".into()),
    };
    assert!(matches!(input.validate(), Err(EditorError::InvalidValue(_))));
}

#[test]
fn test_overlay_keeps_absent_fields() {
    let record: BookmarkRecord = serde_json::from_value(
        json!({"id": "a1", "bookmark": "http://x.com", "type": "python", "priority": "urgent"}),
    )
    .unwrap();
    let mut form = FormInput::from_record(&record);
    form.overlay(FormInput {
        priority: Some("important".into()),
        ..FormInput::default()
    });

    let validated = form.validate().unwrap();
    let merged = record.merged_with(&validated);
    assert_eq!(merged.id.as_deref(), Some("a1"));
    assert_eq!(merged.bookmark, "http://x.com");
    assert_eq!(merged.kind, BookmarkType::Python);
    assert_eq!(merged.priority, Priority::Important);
}

#[test]
fn test_suggestion_wire_shape() {
    assert_eq!(
        serde_json::to_value(Suggestion::Candidate("github.com/foo".into())).unwrap(),
        json!({"value": "github.com/foo", "disabled": false})
    );
    assert_eq!(
        serde_json::to_value(Suggestion::LookupFailed).unwrap(),
        json!({"value": "Error fetching suggestions", "disabled": true})
    );
}
