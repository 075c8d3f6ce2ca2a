use serde::{Deserialize, Deserializer, Serialize};

use crate::core::MANIFEST_UPPER_BOUND;

/// Which callers share a manifest counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterScope {
    /// One counter for every carrier; the store is queried without a carrier filter.
    #[default]
    Global,
    /// An independent counter per carrier, seeded from that carrier's records.
    PerCarrier,
}

/// Manifest sequencer configuration.
///
/// Deserializes with defaults for missing fields, so an application config
/// section may set only what it needs:
///
/// ```
/// use carga::manifest::{CounterScope, SequencerConfig};
///
/// let config: SequencerConfig = serde_json::from_str(r#"{"scope":"per_carrier"}"#).unwrap();
/// assert_eq!(config.scope, CounterScope::PerCarrier);
/// assert_eq!(config.window, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// How many recent records to inspect when seeding, newest first.
    /// Never below 1; a configured 0 is raised to 1.
    #[serde(deserialize_with = "deserialize_window")]
    pub window: usize,
    /// Persisted manifest numbers at or above this value are ignored.
    pub upper_bound: u64,
    /// Counter sharing between carriers.
    pub scope: CounterScope,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            window: 100,
            upper_bound: MANIFEST_UPPER_BOUND,
            scope: CounterScope::Global,
        }
    }
}

fn deserialize_window<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    Ok(usize::deserialize(deserializer)?.max(1))
}

/// Builder for [`SequencerConfig`].
///
/// ```
/// use carga::manifest::{CounterScope, SequencerConfigBuilder};
///
/// let config = SequencerConfigBuilder::new()
///     .window(250)
///     .scope(CounterScope::PerCarrier)
///     .build();
/// assert_eq!(config.upper_bound, 1_000_000);
/// ```
#[derive(Debug, Default)]
pub struct SequencerConfigBuilder {
    config: SequencerConfig,
}

impl SequencerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of recent records inspected when seeding (minimum 1).
    pub fn window(mut self, window: usize) -> Self {
        self.config.window = window.max(1);
        self
    }

    /// Set the exclusive upper bound for valid persisted numbers.
    pub fn upper_bound(mut self, bound: u64) -> Self {
        self.config.upper_bound = bound;
        self
    }

    pub fn scope(mut self, scope: CounterScope) -> Self {
        self.config.scope = scope;
        self
    }

    pub fn build(self) -> SequencerConfig {
        self.config
    }
}
