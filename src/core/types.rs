use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::CargaError;

/// Manifest numbers at or above this value are treated as legacy/corrupt data.
pub const MANIFEST_UPPER_BOUND: u64 = 1_000_000;

/// Parse a persisted manifest number, accepting only `0 < n < upper_bound`.
///
/// Returns `None` for non-numeric, zero, negative or out-of-range values so
/// that bad historical rows never poison the sequence.
pub fn parse_manifest_number(raw: &str, upper_bound: u64) -> Option<u64> {
    let n: i64 = raw.trim().parse().ok()?;
    if n <= 0 {
        return None;
    }
    let n = n as u64;
    (n < upper_bound).then_some(n)
}

/// Transport company a load is registered under.
///
/// Always trimmed and upper-cased; only ASCII alphanumerics, `_` and `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Carrier(String);

impl Carrier {
    pub fn new(id: &str) -> Result<Self, CargaError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CargaError::Builder("carrier must not be empty".into()));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CargaError::Builder(format!(
                "carrier '{id}' may only contain letters, digits, '_' and '-'"
            )));
        }
        Ok(Self(id.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Carrier {
    type Err = CargaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Carrier {
    type Error = CargaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Carrier> for String {
    fn from(carrier: Carrier) -> Self {
        carrier.0
    }
}

/// Shape of a scanned or typed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeFormat {
    /// 44-digit DANFE access key.
    Danfe,
    /// All digits, 1 to 20 characters.
    NumericShort,
    /// Two alphanumeric segments joined by a single hyphen.
    Hyphenated,
    /// Letters and digits only, 1 to 50 characters.
    Alphanumeric,
    /// Anything else.
    Invalid,
}

impl fmt::Display for CodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Danfe => "DANFE",
            Self::NumericShort => "numeric",
            Self::Hyphenated => "hyphenated",
            Self::Alphanumeric => "alphanumeric",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// An invoice/note attached to a load control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Raw code as scanned or typed (trimmed).
    pub code: String,
    /// Extracted note number used for display and lookup.
    pub number: String,
    /// Classification of `code`.
    pub format: CodeFormat,
    /// Invoice value, if known.
    pub amount: Option<Decimal>,
    /// Number of volumes (packages) declared for this note.
    pub volumes: Option<u32>,
}

impl Note {
    pub fn new(code: impl Into<String>, number: impl Into<String>, format: CodeFormat) -> Self {
        Self {
            code: code.into().trim().to_string(),
            number: number.into(),
            format,
            amount: None,
            volumes: None,
        }
    }

    /// Set the invoice value.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the declared number of volumes.
    pub fn volumes(mut self, volumes: u32) -> Self {
        self.volumes = Some(volumes);
        self
    }
}

/// A registered load ("controle de carga").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadControl {
    /// Record identifier assigned by the application.
    pub id: String,
    /// Carrier responsible for the transport.
    pub carrier: Carrier,
    /// Sequential manifest number, once issued.
    pub manifest_number: Option<String>,
    /// Driver name.
    pub driver: String,
    /// Person responsible for the load at the dock.
    pub responsible: Option<String>,
    /// Vehicle license plate.
    pub vehicle_plate: Option<String>,
    /// Creation timestamp; the store orders by this field.
    pub created_at: DateTime<Utc>,
    /// Attached notes, unique by note number.
    pub notes: Vec<Note>,
}

impl LoadControl {
    /// Attach a note, rejecting a note number already present.
    pub fn add_note(&mut self, note: Note) -> Result<(), CargaError> {
        if self.has_note(&note.number) {
            return Err(CargaError::Validation(format!(
                "note {} is already attached to load {}",
                note.number, self.id
            )));
        }
        self.notes.push(note);
        Ok(())
    }

    pub fn has_note(&self, number: &str) -> bool {
        self.notes.iter().any(|n| n.number == number)
    }

    /// Sum of all known note amounts.
    pub fn total_amount(&self) -> Decimal {
        self.notes.iter().filter_map(|n| n.amount).sum()
    }

    /// Sum of all declared volumes.
    pub fn total_volumes(&self) -> u32 {
        self.notes.iter().filter_map(|n| n.volumes).sum()
    }

    /// Manifest number as an integer, if it is a valid sequence value.
    pub fn manifest_value(&self) -> Option<u64> {
        self.manifest_number
            .as_deref()
            .and_then(|m| parse_manifest_number(m, MANIFEST_UPPER_BOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn manifest_number_bounds() {
        assert_eq!(parse_manifest_number("7", MANIFEST_UPPER_BOUND), Some(7));
        assert_eq!(parse_manifest_number(" 42 ", MANIFEST_UPPER_BOUND), Some(42));
        // Leading '+' is accepted as an explicit sign
        assert_eq!(parse_manifest_number("+5", MANIFEST_UPPER_BOUND), Some(5));
        assert_eq!(parse_manifest_number("+0", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("999999", MANIFEST_UPPER_BOUND), Some(999_999));
        assert_eq!(parse_manifest_number("1000000", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("0", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("-5", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("abc", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("", MANIFEST_UPPER_BOUND), None);
        assert_eq!(parse_manifest_number("12.5", MANIFEST_UPPER_BOUND), None);
    }

    #[test]
    fn carrier_normalized() {
        let c = Carrier::new("  transmil ").unwrap();
        assert_eq!(c.as_str(), "TRANSMIL");
        assert_eq!(c, "TransMil".parse().unwrap());
    }

    #[test]
    fn carrier_rejects_bad_input() {
        assert!(Carrier::new("").is_err());
        assert!(Carrier::new("   ").is_err());
        assert!(Carrier::new("trans mil").is_err());
        assert!(Carrier::new("trans/mil").is_err());
    }

    #[test]
    fn carrier_serde_roundtrip() {
        let c = Carrier::new("braspress").unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"BRASPRESS\"");
        let back: Carrier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<Carrier>("\"\"").is_err());
    }

    #[test]
    fn note_totals() {
        let mut lc = LoadControl {
            id: "1".into(),
            carrier: Carrier::new("A").unwrap(),
            manifest_number: Some("15".into()),
            driver: "João".into(),
            responsible: None,
            vehicle_plate: None,
            created_at: Utc::now(),
            notes: Vec::new(),
        };
        lc.add_note(
            Note::new("123", "123", CodeFormat::NumericShort)
                .amount(dec!(100.50))
                .volumes(3),
        )
        .unwrap();
        lc.add_note(Note::new("456", "456", CodeFormat::NumericShort).amount(dec!(20)))
            .unwrap();
        assert!(lc.add_note(Note::new("X-123", "123", CodeFormat::Hyphenated)).is_err());
        assert_eq!(lc.total_amount(), dec!(120.50));
        assert_eq!(lc.total_volumes(), 3);
        assert_eq!(lc.manifest_value(), Some(15));
    }
}
