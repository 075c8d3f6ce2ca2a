use carga::core::*;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;

fn carrier() -> Carrier {
    Carrier::new("braspress").unwrap()
}

fn note(number: &str) -> Note {
    Note::new(number, number, CodeFormat::NumericShort)
}

// --- Building load controls ---

#[test]
fn full_load_control() {
    let created = Utc.with_ymd_and_hms(2024, 6, 15, 7, 30, 0).unwrap();
    let load = LoadControlBuilder::new("LC-2024-001", carrier(), "Maria Souza")
        .responsible("João Pereira")
        .vehicle_plate("abc1d23")
        .manifest_number("431")
        .created_at(created)
        .add_note(note("4471").amount(dec!(1200.00)).volumes(3))
        .add_note(note("4472").amount(dec!(99.90)).volumes(1))
        .build()
        .unwrap();

    assert_eq!(load.carrier.as_str(), "BRASPRESS");
    assert_eq!(load.vehicle_plate.as_deref(), Some("ABC1D23"));
    assert_eq!(load.created_at, created);
    assert_eq!(load.total_amount(), dec!(1299.90));
    assert_eq!(load.total_volumes(), 4);
    assert_eq!(load.manifest_value(), Some(431));
    assert!(validate_load_control(&load).is_empty());
}

#[test]
fn notes_without_amount_do_not_count() {
    let load = LoadControlBuilder::new("1", carrier(), "Ana")
        .add_note(note("1").amount(dec!(10)))
        .add_note(note("2"))
        .build()
        .unwrap();
    assert_eq!(load.total_amount(), dec!(10));
    assert_eq!(load.total_volumes(), 0);
}

#[test]
fn legacy_manifest_number_is_not_a_sequence_value() {
    let load = LoadControlBuilder::new("1", carrier(), "Ana")
        .manifest_number("1718900000")
        .add_note(note("1"))
        .build()
        .unwrap();
    assert_eq!(load.manifest_value(), None);

    let errors = validate_load_control(&load);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "manifest_number");
    assert_eq!(errors[0].rule.as_deref(), Some("LC-04"));
}

// --- Validation ---

#[test]
fn invalid_note_format_reported() {
    let mut load = LoadControlBuilder::new("1", carrier(), "Ana").build().unwrap();
    load.notes.push(Note::new("NF 12", "NF 12", CodeFormat::Invalid));
    let errors = validate_load_control(&load);
    assert!(
        errors
            .iter()
            .any(|e| e.rule.as_deref() == Some("LC-07") && e.field == "notes[0].format")
    );
}

#[test]
fn empty_note_number_reported() {
    let mut load = LoadControlBuilder::new("1", carrier(), "Ana").build().unwrap();
    load.add_note(Note::new("ABC-", "", CodeFormat::Invalid)).unwrap();
    let rules: Vec<_> = validate_load_control(&load)
        .into_iter()
        .filter_map(|e| e.rule)
        .collect();
    assert!(rules.contains(&"LC-06".to_string()));
}

#[test]
fn error_display() {
    let err = LoadControlBuilder::new("1", carrier(), "").build().unwrap_err();
    assert_eq!(err.to_string(), "builder error: driver must not be empty");

    let err = Carrier::new("a b").unwrap_err();
    assert!(err.to_string().starts_with("builder error: carrier 'a b'"));
}

// --- Serialization ---

#[test]
fn load_control_json_roundtrip() {
    let load = LoadControlBuilder::new("LC-9", carrier(), "Ana")
        .manifest_number("12")
        .add_note(note("4471").amount(dec!(10.50)))
        .build()
        .unwrap();

    let json = serde_json::to_string(&load).unwrap();
    assert!(json.contains(r#""carrier":"BRASPRESS""#));
    assert!(json.contains(r#""format":"numeric_short""#));
    assert!(json.contains(r#""amount":"10.50""#));

    let back: LoadControl = serde_json::from_str(&json).unwrap();
    assert_eq!(back.notes, load.notes);
    assert_eq!(back.carrier, load.carrier);
    assert_eq!(back.created_at, load.created_at);
}
