//! Volume (package) scan tracking for a load.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::extract::extract_volume_note_number;
use super::format::CodeError;
use crate::core::LoadControl;

/// Result of recording one volume scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeScan {
    pub note_number: String,
    /// Scans recorded for this note so far, including this one.
    pub count: u32,
}

/// A note whose scanned volumes fall short of what was declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeShortfall {
    pub note_number: String,
    pub declared: u32,
    pub scanned: u32,
}

/// Counts volume label scans per note number while a load is checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeTally {
    counts: BTreeMap<String, u32>,
}

impl VolumeTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scanned volume label.
    pub fn record(&mut self, code: &str) -> Result<VolumeScan, CodeError> {
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(CodeError {
                value: String::new(),
                reason: "code must not be empty".into(),
            });
        }
        let note_number = extract_volume_note_number(trimmed);
        if note_number.is_empty() {
            return Err(CodeError {
                value: trimmed.to_string(),
                reason: "no note number found in volume label".into(),
            });
        }

        let count = self.counts.entry(note_number.clone()).or_insert(0);
        *count += 1;
        tracing::trace!(note = %note_number, count = *count, "volume scanned");
        Ok(VolumeScan {
            note_number,
            count: *count,
        })
    }

    pub fn count(&self, note_number: &str) -> u32 {
        self.counts.get(note_number).copied().unwrap_or(0)
    }

    /// Note numbers seen so far, sorted.
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    /// Total number of scans recorded.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Notes on `load` with declared volumes not yet fully scanned.
    pub fn missing_against(&self, load: &LoadControl) -> Vec<VolumeShortfall> {
        load.notes
            .iter()
            .filter_map(|note| {
                let declared = note.volumes?;
                let scanned = self.count(&note.number);
                (scanned < declared).then(|| VolumeShortfall {
                    note_number: note.number.clone(),
                    declared,
                    scanned,
                })
            })
            .collect()
    }

    /// Scanned note numbers that are not attached to `load`.
    pub fn unknown_against<'a>(&'a self, load: &LoadControl) -> Vec<&'a str> {
        self.notes().filter(|n| !load.has_note(n)).collect()
    }
}
