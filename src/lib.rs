//! # carga
//!
//! Domain library for cargo load control ("controle de carga"): load-control
//! records with their attached notes, sequential manifest numbers, and
//! barcode/DANFE note-number extraction.
//!
//! Invoice values use [`rust_decimal::Decimal`], never floating point.
//! Nothing in this crate holds global state: the manifest sequencer is an
//! ordinary value owned by the application.
//!
//! ## Quick Start
//!
//! ```rust
//! use carga::core::*;
//! use rust_decimal_macros::dec;
//!
//! let mut load = LoadControlBuilder::new("LC-1", Carrier::new("braspress").unwrap(), "Maria Souza")
//!     .vehicle_plate("ABC1D23")
//!     .manifest_number("128")
//!     .add_note(Note::new("NF-4471", "4471", CodeFormat::Hyphenated).amount(dec!(1250.00)).volumes(4))
//!     .build()
//!     .unwrap();
//!
//! load.add_note(Note::new("4480", "4480", CodeFormat::NumericShort).amount(dec!(80.00)))
//!     .unwrap();
//!
//! assert!(validate_load_control(&load).is_empty());
//! assert_eq!(load.total_amount(), dec!(1330.00));
//! assert_eq!(load.manifest_value(), Some(128));
//! ```
//!
//! With the `manifest` and `barcode` features, notes come from
//! `barcode::scan_code` and manifest numbers from
//! `manifest::ManifestSequencer`.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Load-control types, errors, validation |
//! | `manifest` | Manifest number sequencer and store contract |
//! | `barcode` | Code validation, DANFE parsing, note-number extraction, volume tally |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "manifest")]
pub mod manifest;

#[cfg(feature = "barcode")]
pub mod barcode;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
