//! DANFE access key (chave de acesso) layout.
//!
//! A 44-digit key encodes, in order:
//!
//! | Positions | Width | Field |
//! |-----------|-------|-------|
//! | 1–2   | 2  | IBGE state code (cUF) |
//! | 3–6   | 4  | year and month of issue (AAMM) |
//! | 7–20  | 14 | issuer CNPJ |
//! | 21–22 | 2  | document model (55 = NF-e, 65 = NFC-e) |
//! | 23–25 | 3  | series |
//! | 26–34 | 9  | note number (nNF) |
//! | 35    | 1  | emission type |
//! | 36–43 | 8  | numeric code |
//! | 44    | 1  | mod-11 check digit |

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::format::{CodeError, DANFE_KEY_LEN, is_all_digits};

/// Zero-based byte range of the note number inside a DANFE key.
pub const NOTE_NUMBER_RANGE: Range<usize> = 25..34;

/// Note number embedded in a 44-digit key, or `None` for any other input.
pub fn danfe_note_number(key: &str) -> Option<&str> {
    if key.len() == DANFE_KEY_LEN && is_all_digits(key) {
        Some(&key[NOTE_NUMBER_RANGE])
    } else {
        None
    }
}

/// Parsed DANFE access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanfeKey {
    key: String,
    pub state_code: u8,
    pub year: u16,
    pub month: u8,
    pub issuer_cnpj: String,
    pub model: String,
    pub series: String,
    /// Nine digits, zero-padded.
    pub note_number: String,
    pub emission_type: u8,
    pub numeric_code: String,
    pub check_digit: u8,
}

impl DanfeKey {
    /// Parse a 44-digit key. Surrounding whitespace is ignored.
    ///
    /// Only the shape is checked; use [`has_valid_check_digit`](Self::has_valid_check_digit)
    /// to verify the trailing digit.
    pub fn parse(key: &str) -> Result<Self, CodeError> {
        let key = key.trim();
        if !is_all_digits(key) || key.len() != DANFE_KEY_LEN {
            return Err(CodeError {
                value: key.to_string(),
                reason: format!("a DANFE key must have exactly {DANFE_KEY_LEN} digits"),
            });
        }

        // All ASCII digits, so every slice below is in bounds and parses
        let digit = |i: usize| key.as_bytes()[i] - b'0';
        let two = |i: usize| digit(i) * 10 + digit(i + 1);

        Ok(Self {
            key: key.to_string(),
            state_code: two(0),
            year: 2000 + u16::from(two(2)),
            month: two(4),
            issuer_cnpj: key[6..20].to_string(),
            model: key[20..22].to_string(),
            series: key[22..25].to_string(),
            note_number: key[NOTE_NUMBER_RANGE].to_string(),
            emission_type: digit(34),
            numeric_code: key[35..43].to_string(),
            check_digit: digit(43),
        })
    }

    /// The full 44-digit key.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Note number without leading zeros.
    pub fn note_number_value(&self) -> u64 {
        self.note_number
            .bytes()
            .fold(0, |acc, b| acc * 10 + u64::from(b - b'0'))
    }

    /// Check digit computed from the first 43 digits.
    pub fn expected_check_digit(&self) -> u8 {
        compute_check_digit(&self.key[..DANFE_KEY_LEN - 1])
    }

    pub fn has_valid_check_digit(&self) -> bool {
        self.expected_check_digit() == self.check_digit
    }
}

/// Mod-11 check digit with weights 2..=9 applied right to left.
fn compute_check_digit(digits: &str) -> u8 {
    let sum: u32 = digits
        .bytes()
        .rev()
        .zip((2..=9).cycle())
        .map(|(b, w)| u32::from(b - b'0') * w)
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => (11 - r) as u8,
    }
}
