use serde::{Deserialize, Serialize};

use super::danfe::{DanfeKey, danfe_note_number};
use super::format::{CodeError, DANFE_KEY_LEN, MAX_NUMERIC_LEN, classify, validate_code};
use crate::core::{CodeFormat, Note};

/// Digits kept by the volume fallback when nothing else matches.
const VOLUME_TAIL_DIGITS: usize = 9;

/// Extract the note number from a scanned or typed code.
///
/// - 44-digit DANFE key: the 9-digit note number at positions 26–34
/// - contains a hyphen: everything after the first hyphen (may be empty)
/// - up to 20 characters: the code itself
/// - anything longer: its first 20 characters
///
/// Surrounding whitespace is ignored. This does not validate; see
/// [`scan_code`] for the validating entry point.
pub fn extract_note_number(code: &str) -> String {
    let code = code.trim();
    if let Some(number) = danfe_note_number(code) {
        return number.to_string();
    }
    passthrough_or_split(code).unwrap_or_else(|| code.chars().take(MAX_NUMERIC_LEN).collect())
}

/// Extract the note number from a volume (package) label scan.
///
/// Volume labels often wrap the DANFE key in extra digits or separators, so
/// all non-digits are stripped first:
/// - exactly 44 digits: the DANFE note number
/// - more than 44 digits: the DANFE note number of the first 44-digit window
///   starting with '8' or '9'
///
/// Otherwise the trimmed code is split at its first hyphen, passed through
/// when at most 20 characters long, or reduced to its last 9 digits.
pub fn extract_volume_note_number(code: &str) -> String {
    let code = code.trim();
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == DANFE_KEY_LEN {
        if let Some(number) = danfe_note_number(&digits) {
            return number.to_string();
        }
    } else if digits.len() > DANFE_KEY_LEN {
        let window = (0..=digits.len() - DANFE_KEY_LEN)
            .filter(|&i| matches!(digits.as_bytes()[i], b'8' | b'9'))
            .find_map(|i| danfe_note_number(&digits[i..i + DANFE_KEY_LEN]));
        if let Some(number) = window {
            return number.to_string();
        }
    }

    if let Some(number) = passthrough_or_split(code) {
        return number;
    }
    if digits.is_empty() {
        return code.chars().take(MAX_NUMERIC_LEN).collect();
    }
    digits[digits.len().saturating_sub(VOLUME_TAIL_DIGITS)..].to_string()
}

/// Hyphen split or short-code passthrough, shared by both extractors.
fn passthrough_or_split(code: &str) -> Option<String> {
    if let Some((_, after)) = code.split_once('-') {
        return Some(after.to_string());
    }
    if code.chars().count() <= MAX_NUMERIC_LEN {
        return Some(code.to_string());
    }
    None
}

/// A validated code with its extracted note number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedCode {
    /// Trimmed input.
    pub raw: String,
    pub format: CodeFormat,
    pub note_number: String,
    /// Parsed key, for DANFE codes only.
    pub danfe: Option<DanfeKey>,
}

impl ScannedCode {
    /// Turn the scan into a note ready to attach to a load control.
    pub fn into_note(self) -> Note {
        Note::new(self.raw, self.note_number, self.format)
    }
}

/// Validate a code and extract its note number.
///
/// Invalid codes are rejected with the validation reason; no extraction is
/// attempted on them.
pub fn scan_code(code: &str) -> Result<ScannedCode, CodeError> {
    validate_code(code).into_result(code)?;

    let raw = code.trim().to_string();
    let format = classify(&raw);
    let danfe = match format {
        CodeFormat::Danfe => Some(DanfeKey::parse(&raw)?),
        _ => None,
    };
    let note_number = extract_note_number(&raw);

    Ok(ScannedCode {
        raw,
        format,
        note_number,
        danfe,
    })
}
