use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use super::config::{CounterScope, SequencerConfig};
use super::store::ManifestStore;
use crate::core::{CargaError, Carrier, LoadControl, StoreError, parse_manifest_number};

/// Sequential manifest number generator.
///
/// Keeps the last issued number in memory and only asks the store for the
/// persisted maximum while the counter is unseeded (0). Every
/// read-increment-write, including seeding, runs under one lock, so
/// concurrent callers never receive the same number from one sequencer.
///
/// The lock is shared by every scope and held across the store query while
/// seeding. Under [`CounterScope::PerCarrier`] a slow seed for one carrier
/// therefore also delays issuance, [`peek`](Self::peek) and
/// [`last_issued`](Self::last_issued) for all other carriers until the query
/// returns.
///
/// ```
/// use carga::core::Carrier;
/// use carga::manifest::{InMemoryManifestStore, ManifestSequencer};
///
/// let seq = ManifestSequencer::with_store(InMemoryManifestStore::new());
/// let carrier = Carrier::new("braspress").unwrap();
/// assert_eq!(seq.next_manifest_number(&carrier), "1");
/// assert_eq!(seq.next_manifest_number(&carrier), "2");
/// ```
#[derive(Debug)]
pub struct ManifestSequencer<S> {
    store: S,
    config: SequencerConfig,
    // Keyed by carrier under PerCarrier scope, by None under Global scope
    counters: Mutex<HashMap<Option<Carrier>, u64>>,
}

impl<S: ManifestStore> ManifestSequencer<S> {
    /// Create a sequencer. A `window` of 0 is raised to 1 so seeding always
    /// looks at the persisted records.
    pub fn new(store: S, mut config: SequencerConfig) -> Self {
        config.window = config.window.max(1);
        Self {
            store,
            config,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Create a sequencer with the default configuration.
    pub fn with_store(store: S) -> Self {
        Self::new(store, SequencerConfig::default())
    }

    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Issue the next manifest number for `carrier`.
    ///
    /// Never fails: if the store cannot be queried while seeding, or the
    /// counter cannot be advanced, the current Unix timestamp in seconds is
    /// returned instead and the counter is left as it was.
    pub fn next_manifest_number(&self, carrier: &Carrier) -> String {
        self.next_manifest_value(carrier).to_string()
    }

    /// Numeric form of [`next_manifest_number`](Self::next_manifest_number).
    pub fn next_manifest_value(&self, carrier: &Carrier) -> u64 {
        match self.issue(carrier) {
            Ok(n) => n,
            Err(e) => {
                let fallback = unix_timestamp();
                tracing::warn!(
                    carrier = %carrier,
                    error = %e,
                    fallback,
                    "manifest number could not be issued, falling back to timestamp"
                );
                fallback
            }
        }
    }

    /// Issue the next manifest number, propagating store failures and
    /// counter exhaustion instead of falling back to a timestamp.
    pub fn try_next_manifest_number(&self, carrier: &Carrier) -> Result<u64, CargaError> {
        self.issue(carrier)
    }

    /// Give `load` a manifest number unless it already has one.
    /// Returns the number the load ends up with.
    pub fn assign(&self, load: &mut LoadControl) -> String {
        if let Some(existing) = &load.manifest_number {
            return existing.clone();
        }
        let number = self.next_manifest_number(&load.carrier);
        load.manifest_number = Some(number.clone());
        number
    }

    /// Last number issued in `carrier`'s scope, 0 if the counter is unseeded.
    pub fn last_issued(&self, carrier: &Carrier) -> u64 {
        let key = self.scope_key(carrier);
        self.lock().get(&key).copied().unwrap_or(0)
    }

    /// Preview the next number without consuming it.
    ///
    /// Returns `None` while the counter is unseeded, since the next value
    /// then depends on the store, and once the counter is exhausted.
    pub fn peek(&self, carrier: &Carrier) -> Option<u64> {
        match self.last_issued(carrier) {
            0 => None,
            n => n.checked_add(1),
        }
    }

    /// Set the counter for `carrier`'s scope, e.g. after migrating records.
    ///
    /// The counter never moves backwards: a value below the last issued
    /// number is rejected.
    pub fn seed(&self, carrier: &Carrier, last_issued: u64) -> Result<(), CargaError> {
        let key = self.scope_key(carrier);
        let mut counters = self.lock();
        let current = counters.get(&key).copied().unwrap_or(0);
        if last_issued < current {
            return Err(CargaError::Numbering(format!(
                "cannot seed counter to {last_issued}, {current} was already issued"
            )));
        }
        counters.insert(key, last_issued);
        Ok(())
    }

    fn issue(&self, carrier: &Carrier) -> Result<u64, CargaError> {
        let key = self.scope_key(carrier);
        let mut counters = self.lock();
        let cached = counters.get(&key).copied().unwrap_or(0);

        let next = if cached > 0 {
            cached.checked_add(1).ok_or_else(|| {
                CargaError::Numbering(format!("manifest counter exhausted at {cached}"))
            })?
        } else {
            let max = self.persisted_max(key.as_ref())?;
            tracing::debug!(carrier = %carrier, max, "seeded manifest counter from store");
            max + 1
        };

        counters.insert(key, next);
        tracing::debug!(carrier = %carrier, manifest = next, "issued manifest number");
        Ok(next)
    }

    fn persisted_max(&self, carrier: Option<&Carrier>) -> Result<u64, StoreError> {
        let numbers = self
            .store
            .recent_manifest_numbers(carrier, self.config.window)?;
        Ok(numbers
            .iter()
            .take(self.config.window)
            .filter_map(|n| parse_manifest_number(n, self.config.upper_bound))
            .max()
            .unwrap_or(0))
    }

    fn scope_key(&self, carrier: &Carrier) -> Option<Carrier> {
        match self.config.scope {
            CounterScope::Global => None,
            CounterScope::PerCarrier => Some(carrier.clone()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Option<Carrier>, u64>> {
        // The map holds plain integers, so a panic elsewhere cannot leave it inconsistent
        self.counters.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unix_timestamp() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::InMemoryManifestStore;

    /// Store returning a fixed list of raw manifest numbers.
    struct FixedStore(Vec<&'static str>);

    impl ManifestStore for FixedStore {
        fn recent_manifest_numbers(
            &self,
            _carrier: Option<&Carrier>,
            limit: usize,
        ) -> Result<Vec<String>, StoreError> {
            Ok(self.0.iter().take(limit).map(|s| s.to_string()).collect())
        }
    }

    fn carrier() -> Carrier {
        Carrier::new("BRASPRESS").unwrap()
    }

    #[test]
    fn seeded_cache_increments() {
        let seq = ManifestSequencer::with_store(FixedStore(vec!["500"]));
        seq.seed(&carrier(), 41).unwrap();
        assert_eq!(seq.next_manifest_number(&carrier()), "42");
        assert_eq!(seq.last_issued(&carrier()), 42);
    }

    #[test]
    fn seeds_from_store_max() {
        let seq = ManifestSequencer::with_store(FixedStore(vec!["3", "7", "abc", "-5", "2000000"]));
        assert_eq!(seq.next_manifest_number(&carrier()), "8");
        assert_eq!(seq.next_manifest_number(&carrier()), "9");
    }

    #[test]
    fn empty_store_starts_at_one() {
        let seq = ManifestSequencer::with_store(FixedStore(Vec::new()));
        assert_eq!(seq.next_manifest_value(&carrier()), 1);
    }

    #[test]
    fn window_limits_inspected_records() {
        let config = SequencerConfig {
            window: 2,
            ..Default::default()
        };
        let seq = ManifestSequencer::new(FixedStore(vec!["4", "5", "90"]), config);
        assert_eq!(seq.next_manifest_value(&carrier()), 6);
    }

    #[test]
    fn peek_does_not_consume() {
        let seq = ManifestSequencer::with_store(FixedStore(vec!["10"]));
        assert_eq!(seq.peek(&carrier()), None);
        assert_eq!(seq.next_manifest_value(&carrier()), 11);
        assert_eq!(seq.peek(&carrier()), Some(12));
        assert_eq!(seq.peek(&carrier()), Some(12));
        assert_eq!(seq.next_manifest_value(&carrier()), 12);
    }

    #[test]
    fn seed_rejects_going_backwards() {
        let seq = ManifestSequencer::with_store(FixedStore(vec!["10"]));
        seq.next_manifest_value(&carrier());
        assert!(seq.seed(&carrier(), 5).is_err());
        assert!(seq.seed(&carrier(), 11).is_ok());
        assert_eq!(seq.next_manifest_value(&carrier()), 12);
    }

    #[test]
    fn fallback_leaves_counter_unseeded() {
        let store = InMemoryManifestStore::new();
        store.set_unavailable(true);
        let seq = ManifestSequencer::with_store(&store);
        let fallback = seq.next_manifest_value(&carrier());
        assert!(fallback > 1_600_000_000);
        assert_eq!(seq.last_issued(&carrier()), 0);

        store.set_unavailable(false);
        assert_eq!(seq.next_manifest_value(&carrier()), 1);
    }

    #[test]
    fn try_next_propagates_store_error() {
        let store = InMemoryManifestStore::new();
        store.set_unavailable(true);
        let seq = ManifestSequencer::with_store(&store);
        let err = seq.try_next_manifest_number(&carrier()).unwrap_err();
        assert!(matches!(err, CargaError::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn exhausted_counter_falls_back_without_wrapping() {
        let seq = ManifestSequencer::with_store(FixedStore(Vec::new()));
        seq.seed(&carrier(), u64::MAX).unwrap();

        let err = seq.try_next_manifest_number(&carrier()).unwrap_err();
        assert!(matches!(err, CargaError::Numbering(_)));

        let fallback = seq.next_manifest_value(&carrier());
        assert!(fallback > 1_600_000_000);
        assert_ne!(fallback, u64::MAX);
        assert_eq!(seq.last_issued(&carrier()), u64::MAX);
        assert_eq!(seq.peek(&carrier()), None);
    }

    #[test]
    fn zero_window_still_reads_store() {
        let config = SequencerConfig {
            window: 0,
            ..Default::default()
        };
        let seq = ManifestSequencer::new(FixedStore(vec!["50"]), config);
        assert_eq!(seq.config().window, 1);
        assert_eq!(seq.next_manifest_value(&carrier()), 51);
    }

    #[test]
    fn assign_keeps_existing_number() {
        let seq = ManifestSequencer::with_store(FixedStore(vec!["20"]));
        let mut load = crate::core::LoadControlBuilder::new("1", carrier(), "Ana")
            .build()
            .unwrap();
        assert_eq!(seq.assign(&mut load), "21");
        assert_eq!(seq.assign(&mut load), "21");
        assert_eq!(load.manifest_number.as_deref(), Some("21"));
        assert_eq!(seq.last_issued(&carrier()), 21);
    }
}
