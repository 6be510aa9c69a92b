//! In-memory hash store.
//!
//! [`InMemoryHashStore`] keeps both directions of the mapping in `HashMap`s
//! behind a single `RwLock`, so a reader never observes one direction without
//! the other.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::trace;

use crate::error::{StoreError, StoreResult};
use crate::traits::HashStore;

#[derive(Debug, Default)]
struct Entries {
    by_value: HashMap<String, String>,
    by_hash: HashMap<String, String>,
}

/// An in-memory implementation of [`HashStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug)]
pub struct InMemoryHashStore {
    name: String,
    entries: RwLock<Entries>,
}

impl InMemoryHashStore {
    /// Create a new empty store.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(Entries::default()),
        }
    }

    /// Create a store seeded with `(value, hash)` entries.
    pub fn with_entries<I, V, H>(name: impl Into<String>, entries: I) -> StoreResult<Self>
    where
        I: IntoIterator<Item = (V, H)>,
        V: AsRef<str>,
        H: AsRef<str>,
    {
        let store = Self::new(name);
        for (value, hash) in entries {
            store.put(value.as_ref(), hash.as_ref())?;
        }
        Ok(store)
    }

    /// Number of entries.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.by_value.len())
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Entries>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Entries>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

/// Hash tokens are embedded verbatim in encoded references.
fn validate_hash(hash: &str) -> StoreResult<()> {
    if hash.is_empty() || !hash.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(StoreError::InvalidHash(hash.to_string()));
    }
    Ok(())
}

impl HashStore for InMemoryHashStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, hash: &str) -> StoreResult<Option<String>> {
        Ok(self.read()?.by_hash.get(hash).cloned())
    }

    fn hash(&self, value: &str) -> StoreResult<Option<String>> {
        Ok(self.read()?.by_value.get(value).cloned())
    }

    fn put(&self, value: &str, hash: &str) -> StoreResult<()> {
        if value.is_empty() {
            return Err(StoreError::EmptyValue);
        }
        validate_hash(hash)?;

        let mut entries = self.write()?;
        match (entries.by_value.get(value), entries.by_hash.get(hash)) {
            (Some(h), Some(v)) if h == hash && v == value => return Ok(()),
            (Some(existing), _) | (_, Some(existing)) => {
                return Err(StoreError::Conflict {
                    store: self.name.clone(),
                    value: value.to_string(),
                    hash: hash.to_string(),
                    existing: existing.clone(),
                });
            }
            (None, None) => {}
        }

        trace!(store = %self.name, value, hash, "registering hash");
        entries.by_value.insert(value.to_string(), hash.to_string());
        entries.by_hash.insert(hash.to_string(), value.to_string());
        Ok(())
    }

    fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        let entries = self.read()?;
        let mut all: Vec<(String, String)> = entries
            .by_value
            .iter()
            .map(|(v, h)| (v.clone(), h.clone()))
            .collect();
        all.sort();
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn classpath_store() -> InMemoryHashStore {
        InMemoryHashStore::with_entries(
            "classpath",
            [
                ("/org/alfresco/repo/virtual/template", "t"),
                ("/org/alfresco/repo/virtual/node", "n"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn resolve_and_hash_are_inverse() {
        let store = classpath_store();
        assert_eq!(
            store.resolve("t").unwrap().as_deref(),
            Some("/org/alfresco/repo/virtual/template")
        );
        assert_eq!(
            store.hash("/org/alfresco/repo/virtual/node").unwrap().as_deref(),
            Some("n")
        );
    }

    #[test]
    fn unknown_entries_are_none() {
        let store = classpath_store();
        assert!(store.resolve("zz").unwrap().is_none());
        assert!(store.hash("/nowhere").unwrap().is_none());
        assert!(!store.contains_hash("zz").unwrap());
    }

    #[test]
    fn put_is_idempotent() {
        let store = classpath_store();
        store.put("/org/alfresco/repo/virtual/template", "t").unwrap();
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn put_rejects_rebinding_a_hash() {
        let store = classpath_store();
        let err = store.put("/other", "t").unwrap_err();
        assert!(
            matches!(err, StoreError::Conflict { ref existing, .. } if existing == "/org/alfresco/repo/virtual/template"),
            "expected Conflict, got: {err}"
        );
    }

    #[test]
    fn put_rejects_rebinding_a_value() {
        let store = classpath_store();
        let err = store.put("/org/alfresco/repo/virtual/node", "x").unwrap_err();
        assert!(matches!(err, StoreError::Conflict { ref existing, .. } if existing == "n"));
    }

    #[test]
    fn put_rejects_bad_hash_tokens() {
        let store = InMemoryHashStore::new("test");
        assert!(matches!(store.put("/a", ""), Err(StoreError::InvalidHash(_))));
        assert!(matches!(store.put("/a", "a-b"), Err(StoreError::InvalidHash(_))));
        assert!(matches!(store.put("/a", "a/b"), Err(StoreError::InvalidHash(_))));
        assert!(matches!(store.put("", "a"), Err(StoreError::EmptyValue)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = Arc::new(classpath_store());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(matches!(store.len(), Err(StoreError::Lock(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Lock(_))));
        assert!(matches!(store.resolve("t"), Err(StoreError::Lock(_))));
    }

    #[test]
    fn entries_are_sorted_by_value() {
        let store = classpath_store();
        let entries = store.entries().unwrap();
        assert_eq!(
            entries,
            vec![
                ("/org/alfresco/repo/virtual/node".to_string(), "n".to_string()),
                ("/org/alfresco/repo/virtual/template".to_string(), "t".to_string()),
            ]
        );
    }

    #[test]
    fn concurrent_reads() {
        let store = Arc::new(classpath_store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(store.resolve("t").unwrap().is_some());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
