//! Sequential manifest numbers for load controls.
//!
//! A [`ManifestSequencer`] hands out monotonically increasing manifest
//! numbers, seeding itself from the highest valid number among the most
//! recent persisted load controls. Persistence is reached through the
//! [`ManifestStore`] trait; [`InMemoryManifestStore`] is provided for tests
//! and single-node use.
//!
//! # Example
//!
//! ```
//! use carga::core::Carrier;
//! use carga::manifest::*;
//!
//! let store = InMemoryManifestStore::new();
//! let config = SequencerConfigBuilder::new().scope(CounterScope::PerCarrier).build();
//! let seq = ManifestSequencer::new(store, config);
//!
//! let jamef = Carrier::new("jamef").unwrap();
//! let tnt = Carrier::new("tnt").unwrap();
//! assert_eq!(seq.next_manifest_number(&jamef), "1");
//! assert_eq!(seq.next_manifest_number(&tnt), "1");
//! assert_eq!(seq.next_manifest_number(&jamef), "2");
//! ```

mod config;
mod numbering;
mod store;

pub use config::{CounterScope, SequencerConfig, SequencerConfigBuilder};
pub use numbering::ManifestSequencer;
pub use store::{InMemoryManifestStore, ManifestStore};
