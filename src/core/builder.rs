use chrono::{DateTime, Utc};

use super::error::CargaError;
use super::types::*;

/// Builder for constructing load controls.
///
/// ```
/// use carga::core::*;
/// use rust_decimal_macros::dec;
///
/// let load = LoadControlBuilder::new("LC-1", Carrier::new("braspress").unwrap(), "Maria Souza")
///     .vehicle_plate("ABC1D23")
///     .manifest_number("128")
///     .add_note(Note::new("NF-4471", "4471", CodeFormat::Hyphenated).amount(dec!(310.00)))
///     .build()
///     .unwrap();
///
/// assert_eq!(load.manifest_value(), Some(128));
/// ```
pub struct LoadControlBuilder {
    id: String,
    carrier: Carrier,
    driver: String,
    manifest_number: Option<String>,
    responsible: Option<String>,
    vehicle_plate: Option<String>,
    created_at: Option<DateTime<Utc>>,
    notes: Vec<Note>,
}

impl LoadControlBuilder {
    pub fn new(id: impl Into<String>, carrier: Carrier, driver: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            carrier,
            driver: driver.into(),
            manifest_number: None,
            responsible: None,
            vehicle_plate: None,
            created_at: None,
            notes: Vec::new(),
        }
    }

    pub fn manifest_number(mut self, number: impl Into<String>) -> Self {
        self.manifest_number = Some(number.into());
        self
    }

    pub fn responsible(mut self, name: impl Into<String>) -> Self {
        self.responsible = Some(name.into());
        self
    }

    pub fn vehicle_plate(mut self, plate: impl Into<String>) -> Self {
        self.vehicle_plate = Some(plate.into().trim().to_uppercase());
        self
    }

    /// Override the creation timestamp (defaults to now).
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn add_note(mut self, note: Note) -> Self {
        self.notes.push(note);
        self
    }

    /// Build the load control.
    ///
    /// Fails on an empty id or driver, or when two notes share a note number.
    pub fn build(self) -> Result<LoadControl, CargaError> {
        if self.id.trim().is_empty() {
            return Err(CargaError::Builder("load control id must not be empty".into()));
        }
        if self.driver.trim().is_empty() {
            return Err(CargaError::Builder("driver must not be empty".into()));
        }

        let mut load = LoadControl {
            id: self.id,
            carrier: self.carrier,
            manifest_number: self.manifest_number,
            driver: self.driver,
            responsible: self.responsible,
            vehicle_plate: self.vehicle_plate,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            notes: Vec::with_capacity(self.notes.len()),
        };
        for note in self.notes {
            load.add_note(note)
                .map_err(|e| CargaError::Builder(e.to_string()))?;
        }
        Ok(load)
    }
}
