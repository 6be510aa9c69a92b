//! Hash store configuration.
//!
//! Each table maps a value to its hash token:
//!
//! ```toml
//! [classpath]
//! "/org/alfresco/repo/virtual/template" = "t"
//!
//! [store_protocol]
//! workspace = "1"
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::memory::InMemoryHashStore;
use crate::traits::HashStore;

/// Value-to-hash tables for every store the codec uses.
///
/// Tables missing from a parsed document are empty, not the built-in ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashStoreConfig {
    #[serde(default)]
    pub classpath: BTreeMap<String, String>,
    #[serde(default)]
    pub repository_path: BTreeMap<String, String>,
    #[serde(default)]
    pub store_protocol: BTreeMap<String, String>,
    #[serde(default)]
    pub store_id: BTreeMap<String, String>,
}

fn table(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(v, h)| (v.to_string(), h.to_string()))
        .collect()
}

impl Default for HashStoreConfig {
    fn default() -> Self {
        Self {
            classpath: table(&[
                ("/org/alfresco/repo/virtual/template", "t"),
                ("/org/alfresco/repo/virtual/node", "n"),
            ]),
            repository_path: table(&[("/app:company_home", "h")]),
            store_protocol: table(&[
                ("workspace", "1"),
                ("archive", "2"),
                ("avm", "3"),
                ("user", "4"),
                ("system", "5"),
            ]),
            store_id: table(&[
                ("SpacesStore", "1"),
                ("lightWeightVersionStore", "2"),
                ("version2Store", "3"),
                ("UserStore", "4"),
                ("system", "5"),
            ]),
        }
    }
}

impl HashStoreConfig {
    /// A configuration with no entries at all.
    pub fn empty() -> Self {
        Self {
            classpath: BTreeMap::new(),
            repository_path: BTreeMap::new(),
            store_protocol: BTreeMap::new(),
            store_id: BTreeMap::new(),
        }
    }

    /// Parse a configuration from TOML. Missing tables are empty.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded hash store configuration");
        Ok(config)
    }

    /// Overlay this configuration on the built-in defaults.
    ///
    /// Entries in `self` win when they name the same value as a default.
    pub fn merged_with_defaults(self) -> Self {
        let mut merged = Self::default();
        merged.classpath.extend(self.classpath);
        merged.repository_path.extend(self.repository_path);
        merged.store_protocol.extend(self.store_protocol);
        merged.store_id.extend(self.store_id);
        merged
    }
}

/// The set of hash stores the codec resolves through.
#[derive(Clone)]
pub struct HashStores {
    pub classpath: Arc<dyn HashStore>,
    pub repository_path: Arc<dyn HashStore>,
    pub store_protocol: Arc<dyn HashStore>,
    pub store_id: Arc<dyn HashStore>,
}

impl HashStores {
    /// Build in-memory stores from a configuration.
    pub fn from_config(config: &HashStoreConfig) -> StoreResult<Self> {
        let build = |name: &str, entries: &BTreeMap<String, String>| -> StoreResult<Arc<dyn HashStore>> {
            Ok(Arc::new(InMemoryHashStore::with_entries(name, entries)?))
        };
        Ok(Self {
            classpath: build("classpath", &config.classpath)?,
            repository_path: build("repository_path", &config.repository_path)?,
            store_protocol: build("store_protocol", &config.store_protocol)?,
            store_id: build("store_id", &config.store_id)?,
        })
    }

    /// Stores holding the built-in entries.
    pub fn builtin() -> StoreResult<Self> {
        Self::from_config(&HashStoreConfig::default())
    }

    /// Every store, in a fixed order.
    pub fn all(&self) -> [&Arc<dyn HashStore>; 4] {
        [
            &self.classpath,
            &self.repository_path,
            &self.store_protocol,
            &self.store_id,
        ]
    }
}

impl fmt::Debug for HashStores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStores")
            .field("classpath", &self.classpath.name())
            .field("repository_path", &self.repository_path.name())
            .field("store_protocol", &self.store_protocol.name())
            .field("store_id", &self.store_id.name())
            .finish()
    }
}
