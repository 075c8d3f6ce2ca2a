//! Barcode classification and note-number extraction.
//!
//! Scanners terminate a read with Enter and hand over the raw text; operators
//! may also type codes by hand. This module decides whether such a code is
//! acceptable and derives the note number used to display and look up the
//! invoice.
//!
//! # Example
//!
//! ```
//! use carga::barcode::*;
//! use carga::core::CodeFormat;
//!
//! assert!(validate_code("NF-4471").valid);
//! assert_eq!(extract_note_number("NF-4471"), "4471");
//!
//! let scan = scan_code("35240312345678000190550010000044711000123458").unwrap();
//! assert_eq!(scan.format, CodeFormat::Danfe);
//! assert_eq!(scan.note_number, "000004471");
//!
//! assert!(scan_code("NF 4471").is_err());
//! ```

mod danfe;
mod extract;
mod format;
mod volume;

pub use danfe::{DanfeKey, NOTE_NUMBER_RANGE, danfe_note_number};
pub use extract::{ScannedCode, extract_note_number, extract_volume_note_number, scan_code};
pub use format::{
    CodeError, CodeValidation, DANFE_KEY_LEN, MAX_ALPHANUMERIC_LEN, MAX_NUMERIC_LEN, classify,
    validate_code,
};
pub use volume::{VolumeScan, VolumeShortfall, VolumeTally};
