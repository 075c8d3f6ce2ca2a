//! Core load-control types, errors, and validation.
//!
//! This module provides the records a cargo control application registers
//! (load controls and the notes attached to them) and the error types shared
//! by the manifest sequencer and the barcode extractor.

mod builder;
mod error;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use types::*;
pub use validation::*;
