//! In-memory session store.

use super::SessionStore;
use crate::AdmissionError;
use std::collections::BTreeMap;

/// A [`SessionStore`] held entirely in memory.
///
/// Volatile: contents vanish with the value. Used as the test fake and for
/// dry runs of the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AdmissionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), AdmissionError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), AdmissionError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").expect("get"), None);

        store.set("k", "v1").expect("set");
        store.set("k", "v2").expect("set");
        assert_eq!(store.get("k").expect("get").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k").expect("remove");
        store.remove("k").expect("remove again");
        assert!(store.is_empty());
    }
}
