//! Persistence contract consumed by the manifest sequencer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::{Carrier, LoadControl, StoreError};

/// Read access to persisted load controls, as needed for seeding the sequence.
pub trait ManifestStore {
    /// Return the manifest numbers of up to `limit` most recently created
    /// records that have one, newest first.
    ///
    /// When `carrier` is `Some`, only that carrier's records are considered.
    /// Values are returned exactly as stored; the sequencer filters them.
    fn recent_manifest_numbers(
        &self,
        carrier: Option<&Carrier>,
        limit: usize,
    ) -> Result<Vec<String>, StoreError>;
}

impl<S: ManifestStore + ?Sized> ManifestStore for &S {
    fn recent_manifest_numbers(
        &self,
        carrier: Option<&Carrier>,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        (**self).recent_manifest_numbers(carrier, limit)
    }
}

impl<S: ManifestStore + ?Sized> ManifestStore for Arc<S> {
    fn recent_manifest_numbers(
        &self,
        carrier: Option<&Carrier>,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        (**self).recent_manifest_numbers(carrier, limit)
    }
}

/// In-process store of load controls.
///
/// Useful for tests, demos and single-node deployments that load records at
/// startup. Can be switched into an unavailable state to exercise the
/// sequencer's fallback path.
#[derive(Debug, Default)]
pub struct InMemoryManifestStore {
    records: RwLock<Vec<LoadControl>>,
    unavailable: AtomicBool,
}

impl InMemoryManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with records.
    pub fn with_records(records: impl IntoIterator<Item = LoadControl>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn insert(&self, load: LoadControl) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(load);
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every query fail with [`StoreError::Unavailable`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn recent_manifest_numbers(
        &self,
        carrier: Option<&Carrier>,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store disabled".into()));
        }

        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        // Reverse insertion order first so that ties on created_at favor the latest insert
        let mut matching: Vec<&LoadControl> = records
            .iter()
            .rev()
            .filter(|r| r.manifest_number.is_some())
            .filter(|r| carrier.is_none_or(|c| &r.carrier == c))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .take(limit)
            .filter_map(|r| r.manifest_number.clone())
            .collect())
    }
}
