//! # Persisted Store
//!
//! Wraps a [`PosStore`] so that every mutation is written back to a
//! [`SnapshotBackend`] under a single storage key.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       PersistedStore                                    │
//! │                                                                         │
//! │  open(backend, key)                                                    │
//! │    ├── blob found + decodes  ──► PosStore::from_snapshot               │
//! │    └── missing / bad blob    ──► PosStore::seeded                      │
//! │                                                                         │
//! │  apply(|store| store.add_to_cart(..))                                  │
//! │    1. run the mutation against the in-memory store                     │
//! │    2. encode the full snapshot as { "version": 1, "state": ... }       │
//! │    3. backend.save(key, blob)   (failure: warn, keep going)            │
//! │                                                                         │
//! │  reset()  ──► seed data, saved immediately (try_reset reports errors)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The in-memory state is the source of truth for the session. A failed save
//! never rolls back or fails the operation that triggered it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use till_core::{PosStore, Snapshot};

use crate::backend::SnapshotBackend;
use crate::error::{PersistError, PersistResult};

/// Current envelope format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk wrapper around the snapshot.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    version: u32,
    state: S,
}

/// Serializes a snapshot into the stored envelope format.
pub fn encode(snapshot: &Snapshot) -> PersistResult<String> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        state: snapshot,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parses a stored envelope.
///
/// The version is checked before the state is interpreted.
pub fn decode(blob: &str) -> PersistResult<Snapshot> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(blob)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(PersistError::UnsupportedVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.state)?)
}

/// A [`PosStore`] bound to a storage slot.
pub struct PersistedStore<B: SnapshotBackend> {
    backend: B,
    key: String,
    store: PosStore,
    restored: bool,
}

impl<B: SnapshotBackend> PersistedStore<B> {
    /// Restores the snapshot saved under `key`, or starts from seed data.
    ///
    /// Unreadable or incompatible blobs are logged and ignored.
    pub fn open(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();

        let loaded = backend
            .load(&key)
            .and_then(|blob| blob.map(|b| decode(&b)).transpose());

        let (store, restored) = match loaded {
            Ok(Some(snapshot)) => {
                info!(
                    key = %key,
                    products = snapshot.products.len(),
                    transactions = snapshot.transactions.len(),
                    "Restored saved snapshot"
                );
                (PosStore::from_snapshot(snapshot), true)
            }
            Ok(None) => {
                info!(key = %key, "No saved snapshot, starting from seed data");
                (PosStore::seeded(), false)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding unreadable snapshot, starting from seed data");
                (PosStore::seeded(), false)
            }
        };

        PersistedStore {
            backend,
            key,
            store,
            restored,
        }
    }

    /// Whether `open` found and decoded a saved snapshot.
    ///
    /// False when the slot was empty, unreadable or from an unknown version;
    /// in those cases the store started from seed data.
    pub fn restored(&self) -> bool {
        self.restored
    }

    /// Read access to the current state.
    pub fn store(&self) -> &PosStore {
        &self.store
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.store.snapshot()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs `mutate` against the store, then saves the whole snapshot.
    ///
    /// Whatever `mutate` returns is passed through, so callers keep the
    /// result of the underlying operation:
    ///
    /// ```rust,ignore
    /// let sale = persisted.apply(|s| s.complete_transaction(PaymentMethod::Card));
    /// ```
    pub fn apply<R>(&mut self, mutate: impl FnOnce(&mut PosStore) -> R) -> R {
        let result = mutate(&mut self.store);
        self.save_best_effort();
        result
    }

    /// Throws away the current state and saves fresh seed data.
    pub fn reset(&mut self) {
        if let Err(e) = self.try_reset() {
            warn!(key = %self.key, error = %e, "Failed to save snapshot");
        }
    }

    /// Like [`Self::reset`], but reports a failed save.
    ///
    /// The in-memory state is reset either way.
    pub fn try_reset(&mut self) -> PersistResult<()> {
        info!(key = %self.key, "Resetting to seed data");
        self.store = PosStore::seeded();
        self.persist()
    }

    /// Writes the current snapshot, reporting failures to the caller.
    pub fn persist(&mut self) -> PersistResult<()> {
        let blob = encode(self.store.snapshot())?;
        self.backend.save(&self.key, &blob)?;
        debug!(key = %self.key, bytes = blob.len(), "Snapshot saved");
        Ok(())
    }

    /// Gives back the backend and the final state.
    pub fn into_parts(self) -> (B, PosStore) {
        (self.backend, self.store)
    }

    fn save_best_effort(&mut self) {
        if let Err(e) = self.persist() {
            warn!(key = %self.key, error = %e, "Failed to save snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{FileBackend, MemoryBackend};
    use till_core::PaymentMethod;

    const KEY: &str = "pos-storage";

    /// Backend whose writes always fail.
    struct ReadOnlyBackend;

    impl SnapshotBackend for ReadOnlyBackend {
        fn load(&self, _key: &str) -> PersistResult<Option<String>> {
            Ok(None)
        }

        fn save(&mut self, _key: &str, _blob: &str) -> PersistResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove(&mut self, _key: &str) -> PersistResult<()> {
            Ok(())
        }
    }

    /// Memory backend that counts writes.
    #[derive(Default)]
    struct CountingBackend {
        inner: MemoryBackend,
        saves: usize,
    }

    impl SnapshotBackend for CountingBackend {
        fn load(&self, key: &str) -> PersistResult<Option<String>> {
            self.inner.load(key)
        }

        fn save(&mut self, key: &str, blob: &str) -> PersistResult<()> {
            self.saves += 1;
            self.inner.save(key, blob)
        }

        fn remove(&mut self, key: &str) -> PersistResult<()> {
            self.inner.remove(key)
        }
    }

    fn sell_two_coffees<B: SnapshotBackend>(persisted: &mut PersistedStore<B>) {
        persisted
            .apply(|s| s.login("cashier@example.com", "cashier123"))
            .unwrap();
        let coffee = persisted.store().product("1").cloned().unwrap();
        persisted.apply(|s| s.add_to_cart(&coffee, 2));
        let sale = persisted.apply(|s| s.complete_transaction(PaymentMethod::Cash));
        assert!(sale.is_some());
    }

    #[test]
    fn test_open_empty_backend_seeds() {
        let persisted = PersistedStore::open(MemoryBackend::new(), KEY);
        assert_eq!(persisted.store().products().len(), 5);
        assert_eq!(persisted.store().users().len(), 2);
        assert!(persisted.store().current_user().is_none());
        // Nothing written until the first mutation
        assert_eq!(persisted.backend().load(KEY).unwrap(), None);
    }

    #[test]
    fn test_apply_saves_and_reopen_restores() {
        let mut persisted = PersistedStore::open(MemoryBackend::new(), KEY);
        sell_two_coffees(&mut persisted);

        let (backend, before) = persisted.into_parts();
        let reopened = PersistedStore::open(backend, KEY);

        assert_eq!(reopened.snapshot(), before.snapshot());
        assert_eq!(reopened.store().transactions().len(), 1);
        assert_eq!(reopened.store().product("1").unwrap().stock_quantity, 98);
        assert_eq!(
            reopened.store().current_user().map(|u| u.id.as_str()),
            Some("2")
        );
    }

    #[test]
    fn test_envelope_format() {
        let mut persisted = PersistedStore::open(MemoryBackend::new(), KEY);
        persisted.apply(|s| s.clear_cart());

        let blob = persisted.backend().load(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], 1);
        assert!(value["state"]["products"].is_array());
        assert!(value["state"]["currentUser"].is_null());
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_seed() {
        let mut backend = MemoryBackend::new();
        backend.save(KEY, "{not json").unwrap();

        let persisted = PersistedStore::open(backend, KEY);
        assert_eq!(persisted.store().products().len(), 5);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let blob = r#"{"version":2,"state":{}}"#;
        assert!(matches!(
            decode(blob),
            Err(PersistError::UnsupportedVersion { found: 2, expected: 1 })
        ));

        let mut backend = MemoryBackend::new();
        backend.save(KEY, blob).unwrap();
        let persisted = PersistedStore::open(backend, KEY);
        assert_eq!(persisted.store().users().len(), 2);
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = decode(r#"{"version":1,"state":{"products":[]}}"#).unwrap();
        assert!(snapshot.products.is_empty());
        assert!(snapshot.users.is_empty());
        assert!(snapshot.current_user.is_none());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut persisted = PersistedStore::open(ReadOnlyBackend, KEY);
        sell_two_coffees(&mut persisted);

        // State still advanced in memory
        assert_eq!(persisted.store().transactions().len(), 1);
        assert!(persisted.persist().is_err());
    }

    #[test]
    fn test_restored_flag() {
        let empty = PersistedStore::open(MemoryBackend::new(), KEY);
        assert!(!empty.restored());

        let mut backend = MemoryBackend::new();
        backend.save(KEY, r#"{"version":9,"state":{}}"#).unwrap();
        let wrong_version = PersistedStore::open(backend, KEY);
        assert!(!wrong_version.restored());

        let mut persisted = PersistedStore::open(MemoryBackend::new(), KEY);
        persisted.apply(|s| s.clear_cart());
        let (backend, _) = persisted.into_parts();
        assert!(PersistedStore::open(backend, KEY).restored());
    }

    #[test]
    fn test_try_reset_writes_once() {
        let mut persisted = PersistedStore::open(CountingBackend::default(), KEY);
        sell_two_coffees(&mut persisted);
        let before = persisted.backend().saves;

        persisted.try_reset().unwrap();

        assert_eq!(persisted.backend().saves, before + 1);
        assert!(persisted.store().transactions().is_empty());
    }

    #[test]
    fn test_try_reset_reports_failure() {
        let mut persisted = PersistedStore::open(ReadOnlyBackend, KEY);
        sell_two_coffees(&mut persisted);

        assert!(persisted.try_reset().is_err());
        assert!(persisted.store().transactions().is_empty());
    }

    #[test]
    fn test_reset() {
        let mut persisted = PersistedStore::open(MemoryBackend::new(), KEY);
        sell_two_coffees(&mut persisted);

        persisted.reset();
        assert!(persisted.store().transactions().is_empty());
        assert!(persisted.store().current_user().is_none());

        let (backend, _) = persisted.into_parts();
        let reopened = PersistedStore::open(backend, KEY);
        assert!(reopened.store().transactions().is_empty());
    }

    #[test]
    fn test_file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let mut persisted = PersistedStore::open(FileBackend::new(dir.path()), KEY);
        sell_two_coffees(&mut persisted);
        drop(persisted);

        let reopened = PersistedStore::open(FileBackend::new(dir.path()), KEY);
        assert_eq!(reopened.store().transactions().len(), 1);
        assert_eq!(reopened.store().transactions()[0].total_cents, 798);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut persisted = PersistedStore::open(MemoryBackend::new(), "a");
        persisted.apply(|s| s.delete_product("1"));

        let (backend, _) = persisted.into_parts();
        let other = PersistedStore::open(backend, "b");
        assert_eq!(other.store().products().len(), 5);
    }
}
