//! # Storage Module
//!
//! The session store and the gateway that keeps the record in it.
//!
//! ## Storage Backends
//!
//! Any [`SessionStore`] can back a [`FormStore`]:
//! - `MemoryStore`: in-process map (tests, dry runs)
//! - `FileStore`: one JSON file of key/value pairs
//! - `RedbStore`: redb embedded database, ACID writes
//!
//! ## Failure Policy
//!
//! `load` never fails. A read error or an undecodable value is logged and
//! treated as the empty record, which sends the applicant back to step 1.
//! `save` and `clear` propagate errors so a transition never advances on
//! an unsaved record.

mod file;
mod memory;
mod redb_store;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::primitives::STORAGE_KEY;
use crate::{AdmissionError, ApplicationRecord};

// =============================================================================
// SESSION STORE
// =============================================================================

/// A string key/value store scoped to one applicant session.
pub trait SessionStore {
    /// Read the value under `key`, `None` if unset.
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError>;

    /// Remove `key`. Removing an unset key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), AdmissionError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
        (**self).remove(key)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
        (**self).remove(key)
    }
}

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a read failure and fall back to the default value.
fn log_and_default<T: Default>(result: Result<T, AdmissionError>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "admission_core::storage", "{} failed, using empty record: {}", context, e);
            T::default()
        }
    }
}

// =============================================================================
// FORM STORE (GATEWAY)
// =============================================================================

/// Loads, merges and clears the application record in a [`SessionStore`].
///
/// The whole record lives under a single key as one JSON object.
#[derive(Debug)]
pub struct FormStore<S> {
    backend: S,
}

impl<S: SessionStore> FormStore<S> {
    /// Wrap a session store.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get a reference to the underlying store.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Consume the gateway and return the underlying store.
    pub fn into_inner(self) -> S {
        self.backend
    }

    /// The persisted record, or an empty one if none exists.
    pub fn load(&self) -> ApplicationRecord {
        log_and_default(self.try_load(), "load")
    }

    /// Read the persisted record, failing only when the backend does.
    ///
    /// A stored value that no longer decodes is unrecoverable and counts as
    /// the empty record.
    fn try_load(&self) -> Result<ApplicationRecord, AdmissionError> {
        let Some(raw) = self.backend.get(STORAGE_KEY)? else {
            return Ok(ApplicationRecord::default());
        };
        let decoded = serde_json::from_str(&raw)
            .map_err(|e| AdmissionError::Serialization(format!("Decode record: {}", e)));
        Ok(log_and_default(decoded, "decode"))
    }

    /// Merge `partial` over the persisted record and write the result.
    ///
    /// Returns the merged record as persisted. A failed read fails the
    /// save, so a partial update never replaces a record it could not see.
    pub fn save(&mut self, partial: &ApplicationRecord) -> Result<ApplicationRecord, AdmissionError> {
        let mut record = self.try_load()?;
        record.merge(partial);

        let encoded = serde_json::to_string(&record)
            .map_err(|e| AdmissionError::Serialization(format!("Encode record: {}", e)))?;
        self.backend.set(STORAGE_KEY, &encoded)?;

        tracing::debug!(target: "admission_core::storage", bytes = encoded.len(), "record saved");
        Ok(record)
    }

    /// Remove the persisted record entirely.
    pub fn clear(&mut self) -> Result<(), AdmissionError> {
        self.backend.remove(STORAGE_KEY)?;
        tracing::debug!(target: "admission_core::storage", "record cleared");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Campus, Gender};

    /// A store whose reads and writes always fail.
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, AdmissionError> {
            Err(AdmissionError::Storage("quota exceeded".into()))
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), AdmissionError> {
            Err(AdmissionError::Storage("quota exceeded".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), AdmissionError> {
            Err(AdmissionError::Storage("quota exceeded".into()))
        }
    }

    /// A memory store whose reads start failing once `reads_fail` is set.
    #[derive(Default)]
    struct FlakyReadStore {
        inner: MemoryStore,
        reads_fail: bool,
    }

    impl SessionStore for FlakyReadStore {
        fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
            if self.reads_fail {
                return Err(AdmissionError::Storage("read timed out".into()));
            }
            self.inner.get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
            self.inner.set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn load_of_fresh_store_is_empty() {
        let store = FormStore::new(MemoryStore::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_merges_over_previous() {
        let mut store = FormStore::new(MemoryStore::new());
        store
            .save(&ApplicationRecord {
                full_name: Some("Asha".into()),
                gender: Some(Gender::Female),
                ..ApplicationRecord::default()
            })
            .expect("first save");
        store
            .save(&ApplicationRecord::with_campus(Campus::Siliguri))
            .expect("second save");

        let record = store.load();
        assert_eq!(record.full_name.as_deref(), Some("Asha"));
        assert_eq!(record.gender, Some(Gender::Female));
        assert_eq!(record.campus, Some(Campus::Siliguri));
    }

    #[test]
    fn record_is_one_json_object_under_one_key() {
        let mut store = FormStore::new(MemoryStore::new());
        store
            .save(&ApplicationRecord::with_campus(Campus::Kolkata))
            .expect("save");

        let raw = store
            .backend()
            .get(STORAGE_KEY)
            .expect("get")
            .expect("present");
        assert_eq!(raw, r#"{"campus":"Kolkata"}"#);
        assert_eq!(store.backend().len(), 1);
    }

    #[test]
    fn clear_twice_is_harmless() {
        let mut store = FormStore::new(MemoryStore::new());
        store
            .save(&ApplicationRecord::with_campus(Campus::Kolkata))
            .expect("save");

        store.clear().expect("first clear");
        assert!(store.load().is_empty());
        store.clear().expect("second clear");
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupted_value_loads_as_empty() {
        let mut backend = MemoryStore::new();
        backend.set(STORAGE_KEY, "{not json").expect("set");

        let store = FormStore::new(backend);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_over_corrupted_value_starts_fresh() {
        let mut backend = MemoryStore::new();
        backend.set(STORAGE_KEY, "{not json").expect("set");

        let mut store = FormStore::new(backend);
        let record = store
            .save(&ApplicationRecord::with_campus(Campus::Siliguri))
            .expect("save");
        assert_eq!(record, ApplicationRecord::with_campus(Campus::Siliguri));
        assert_eq!(store.load(), record);
    }

    #[test]
    fn failed_read_fails_save_and_keeps_record() {
        let mut store = FormStore::new(FlakyReadStore::default());
        store
            .save(&ApplicationRecord {
                full_name: Some("Asha".into()),
                gender: Some(Gender::Female),
                ..ApplicationRecord::default()
            })
            .expect("first save");

        let mut backend = store.into_inner();
        backend.reads_fail = true;
        let mut store = FormStore::new(backend);

        assert!(matches!(
            store.save(&ApplicationRecord::with_campus(Campus::Kolkata)),
            Err(AdmissionError::Storage(_))
        ));

        let raw = store
            .backend()
            .inner
            .get(STORAGE_KEY)
            .expect("get")
            .expect("present");
        assert_eq!(raw, r#"{"fullName":"Asha","gender":"female"}"#);
    }

    #[test]
    fn unavailable_store_loads_empty_but_fails_writes() {
        let mut store = FormStore::new(BrokenStore);

        assert!(store.load().is_empty());
        assert!(matches!(
            store.save(&ApplicationRecord::with_campus(Campus::Kolkata)),
            Err(AdmissionError::Storage(_))
        ));
        assert!(matches!(store.clear(), Err(AdmissionError::Storage(_))));
    }
}
