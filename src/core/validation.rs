use std::collections::HashSet;

use rust_decimal_macros::dec;

use super::error::ValidationError;
use super::types::*;

/// Validate a load control before it is issued a manifest or printed.
/// Returns all validation errors found (not just the first).
pub fn validate_load_control(load: &LoadControl) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if load.id.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "id",
            "load control id must not be empty",
            "LC-01",
        ));
    }

    if load.driver.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "driver",
            "driver must not be empty",
            "LC-02",
        ));
    }

    if load.notes.is_empty() {
        errors.push(ValidationError::with_rule(
            "notes",
            "a load control must carry at least one note",
            "LC-03",
        ));
    }

    // A stored manifest number has to be usable as a sequence seed
    if let Some(manifest) = &load.manifest_number {
        if parse_manifest_number(manifest, MANIFEST_UPPER_BOUND).is_none() {
            errors.push(ValidationError::with_rule(
                "manifest_number",
                format!(
                    "manifest number '{manifest}' must be an integer between 1 and {}",
                    MANIFEST_UPPER_BOUND - 1
                ),
                "LC-04",
            ));
        }
    }

    let mut seen = HashSet::new();
    for (i, note) in load.notes.iter().enumerate() {
        validate_note(note, &format!("notes[{i}]"), &mut errors);
        if !note.number.is_empty() && !seen.insert(note.number.as_str()) {
            errors.push(ValidationError::with_rule(
                format!("notes[{i}].number"),
                format!("note number {} appears more than once", note.number),
                "LC-05",
            ));
        }
    }

    errors
}

fn validate_note(note: &Note, path: &str, errors: &mut Vec<ValidationError>) {
    if note.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            format!("{path}.number"),
            "note number must not be empty",
            "LC-06",
        ));
    }

    if note.format == CodeFormat::Invalid {
        errors.push(ValidationError::with_rule(
            format!("{path}.format"),
            format!("code '{}' is not a recognized format", note.code),
            "LC-07",
        ));
    }

    if let Some(amount) = note.amount {
        if amount < dec!(0) {
            errors.push(ValidationError::with_rule(
                format!("{path}.amount"),
                "note amount must not be negative",
                "LC-08",
            ));
        }
    }

    if note.volumes == Some(0) {
        errors.push(ValidationError::new(
            format!("{path}.volumes"),
            "declared volumes must be at least 1",
        ));
    }
}
