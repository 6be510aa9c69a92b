use std::sync::Arc;

use tracing::trace;
use vref_store::HashStore;

use super::PathHash;
use crate::error::HashError;

/// Encodes and decodes paths as [`PathHash`] pairs.
pub trait PathHasher: Send + Sync {
    /// Hash `path` using the longest registered prefix.
    fn hash(&self, path: &str) -> Result<PathHash, HashError>;

    /// Rebuild the path a pair stands for.
    fn lookup(&self, hash: &PathHash) -> Result<String, HashError>;
}

/// [`PathHasher`] backed by a [`HashStore`] of path prefixes.
///
/// A registered prefix matches only on a `/` boundary. On lookup the stored
/// value and the literal are joined with exactly one `/`, unless the stored
/// value already ends with one.
#[derive(Clone)]
pub struct StoredPathHasher {
    store: Arc<dyn HashStore>,
}

impl StoredPathHasher {
    pub fn new(store: Arc<dyn HashStore>) -> Self {
        Self { store }
    }

    fn resolve(&self, hash: &str) -> Result<String, HashError> {
        self.store
            .resolve(hash)?
            .ok_or_else(|| HashError::UnknownHash {
                store: self.store.name().to_string(),
                hash: hash.to_string(),
            })
    }
}

impl std::fmt::Debug for StoredPathHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredPathHasher")
            .field("store", &self.store.name())
            .finish()
    }
}

impl PathHasher for StoredPathHasher {
    fn hash(&self, path: &str) -> Result<PathHash, HashError> {
        if path.is_empty() {
            return Err(HashError::EmptyPath);
        }
        if let Some(hash) = self.store.hash(path)? {
            return Ok(PathHash::hashed(hash));
        }

        // Longest prefix first. For a separator at `idx` try the prefix that
        // keeps it, then the one that drops it.
        for (idx, _) in path.rmatch_indices('/') {
            let remainder = &path[idx + 1..];
            if remainder.is_empty() {
                continue;
            }

            let with_separator = &path[..=idx];
            if let Some(hash) = self.store.hash(with_separator)? {
                trace!(store = self.store.name(), prefix = with_separator, "prefix hit");
                return Ok(PathHash::mixed(hash, remainder));
            }

            let without_separator = &path[..idx];
            if without_separator.is_empty() || without_separator.ends_with('/') {
                continue;
            }
            if let Some(hash) = self.store.hash(without_separator)? {
                trace!(store = self.store.name(), prefix = without_separator, "prefix hit");
                return Ok(PathHash::mixed(hash, remainder));
            }
        }

        Ok(PathHash::plain(path))
    }

    fn lookup(&self, hash: &PathHash) -> Result<String, HashError> {
        match (&hash.hash, &hash.literal) {
            (Some(h), None) => self.resolve(h),
            (None, Some(literal)) => Ok(literal.clone()),
            (Some(h), Some(literal)) => {
                let mut path = self.resolve(h)?;
                if !path.ends_with('/') {
                    path.push('/');
                }
                path.push_str(literal);
                Ok(path)
            }
            (None, None) => Err(HashError::EmptyPair),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vref_store::InMemoryHashStore;

    fn hasher() -> StoredPathHasher {
        let store = InMemoryHashStore::with_entries(
            "classpath",
            [
                ("/org/alfresco/repo/virtual/template", "t"),
                ("/org/alfresco", "oa"),
                ("/etc/", "e"),
                ("abc123src", "abc123"),
            ],
        )
        .unwrap();
        StoredPathHasher::new(Arc::new(store))
    }

    #[test]
    fn whole_path_is_hashed() {
        let h = hasher();
        assert_eq!(
            h.hash("/org/alfresco/repo/virtual/template").unwrap(),
            PathHash::hashed("t")
        );
    }

    #[test]
    fn longest_prefix_wins() {
        let h = hasher();
        assert_eq!(
            h.hash("/org/alfresco/repo/virtual/template/smartFolder.js").unwrap(),
            PathHash::mixed("t", "smartFolder.js")
        );
        assert_eq!(
            h.hash("/org/alfresco/repo/other/x.js").unwrap(),
            PathHash::mixed("oa", "repo/other/x.js")
        );
    }

    #[test]
    fn prefix_must_end_on_separator() {
        let h = hasher();
        assert_eq!(
            h.hash("/org/alfrescoX/a").unwrap(),
            PathHash::plain("/org/alfrescoX/a")
        );
    }

    #[test]
    fn prefix_with_trailing_separator() {
        let h = hasher();
        let pair = h.hash("/etc/hosts").unwrap();
        assert_eq!(pair, PathHash::mixed("e", "hosts"));
        assert_eq!(h.lookup(&pair).unwrap(), "/etc/hosts");

        let pair = h.hash("/etc//hosts").unwrap();
        assert_eq!(h.lookup(&pair).unwrap(), "/etc//hosts");
    }

    #[test]
    fn unmatched_path_is_plain() {
        let h = hasher();
        assert_eq!(
            h.hash("com/example/Foo.class").unwrap(),
            PathHash::plain("com/example/Foo.class")
        );
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(hasher().hash(""), Err(HashError::EmptyPath)));
    }

    #[test]
    fn lookup_each_shape() {
        let h = hasher();
        assert_eq!(h.lookup(&PathHash::hashed("abc123")).unwrap(), "abc123src");
        assert_eq!(
            h.lookup(&PathHash::mixed("oa", "repo/a.js")).unwrap(),
            "/org/alfresco/repo/a.js"
        );
        assert_eq!(h.lookup(&PathHash::plain("x/y")).unwrap(), "x/y");
    }

    #[test]
    fn lookup_unknown_hash() {
        let err = hasher().lookup(&PathHash::hashed("zz")).unwrap_err();
        assert!(
            matches!(err, HashError::UnknownHash { ref store, ref hash } if store == "classpath" && hash == "zz"),
            "expected UnknownHash, got: {err}"
        );
    }

    #[test]
    fn lookup_empty_pair() {
        let empty = PathHash {
            hash: None,
            literal: None,
        };
        assert!(matches!(hasher().lookup(&empty), Err(HashError::EmptyPair)));
    }

    #[test]
    fn shapes_resolve_consistently() {
        let h = hasher();
        let target = "/org/alfresco/repo/virtual/template";
        let hashed = h.lookup(&PathHash::hashed("t")).unwrap();
        let mixed = h.lookup(&PathHash::mixed("oa", "repo/virtual/template")).unwrap();
        let plain = h.lookup(&PathHash::plain(target)).unwrap();
        assert_eq!(hashed, target);
        assert_eq!(mixed, target);
        assert_eq!(plain, target);
    }
}
