use std::sync::Arc;

use uuid::Uuid;
use vref_store::{HashStore, HashStores};
use vref_types::{NodeRef, StoreRef};

use super::NodeRefHash;
use crate::error::HashError;

/// Encodes and decodes node references as [`NodeRefHash`] pairs.
pub trait NodeRefHasher: Send + Sync {
    fn hash(&self, node: &NodeRef) -> Result<NodeRefHash, HashError>;

    fn lookup(&self, hash: &NodeRefHash) -> Result<NodeRef, HashError>;
}

/// Closed-form node reference hasher.
///
/// The store hash is the one-character token of the store protocol followed
/// by the one-character token of the store identifier. The node hash is the
/// node's UUID read as a 128-bit integer and written in `radix` with
/// lower-case digits.
#[derive(Clone)]
pub struct NodeRefRadixHasher {
    radix: u32,
    store_protocols: Arc<dyn HashStore>,
    store_ids: Arc<dyn HashStore>,
}

impl NodeRefRadixHasher {
    pub const RADIX_36: u32 = 36;

    pub fn new(
        radix: u32,
        store_protocols: Arc<dyn HashStore>,
        store_ids: Arc<dyn HashStore>,
    ) -> Result<Self, HashError> {
        if !(2..=36).contains(&radix) {
            return Err(HashError::InvalidRadix(radix));
        }
        Ok(Self {
            radix,
            store_protocols,
            store_ids,
        })
    }

    /// The standard radix-36 hasher over the store tables in `stores`.
    pub fn radix_36(stores: &HashStores) -> Self {
        Self {
            radix: Self::RADIX_36,
            store_protocols: Arc::clone(&stores.store_protocol),
            store_ids: Arc::clone(&stores.store_id),
        }
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    fn store_token(store: &dyn HashStore, value: &str) -> Result<String, HashError> {
        let token = store
            .hash(value)?
            .ok_or_else(|| HashError::MissingHash {
                store: store.name().to_string(),
                value: value.to_string(),
            })?;
        if token.len() != 1 {
            return Err(HashError::InvalidStoreHash(token));
        }
        Ok(token)
    }

    fn store_value(store: &dyn HashStore, hash: &str) -> Result<String, HashError> {
        store.resolve(hash)?.ok_or_else(|| HashError::UnknownHash {
            store: store.name().to_string(),
            hash: hash.to_string(),
        })
    }

    fn encode_id(&self, mut n: u128) -> String {
        if n == 0 {
            return "0".to_string();
        }
        let radix = u128::from(self.radix);
        let mut digits = Vec::new();
        while n > 0 {
            // The remainder is below the radix, so it fits in a u32 digit.
            let d = (n % radix) as u32;
            digits.push(char::from_digit(d, self.radix).unwrap_or('0'));
            n /= radix;
        }
        digits.iter().rev().collect()
    }

    fn decode_id(&self, hash: &str) -> Result<u128, HashError> {
        let invalid = || HashError::InvalidNodeHash {
            radix: self.radix,
            hash: hash.to_string(),
        };
        let canonical = !hash.is_empty()
            && hash.chars().all(|c| {
                (c.is_ascii_digit() || c.is_ascii_lowercase()) && c.is_digit(self.radix)
            });
        if !canonical {
            return Err(invalid());
        }
        u128::from_str_radix(hash, self.radix).map_err(|_| invalid())
    }
}

impl std::fmt::Debug for NodeRefRadixHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRefRadixHasher")
            .field("radix", &self.radix)
            .field("store_protocols", &self.store_protocols.name())
            .field("store_ids", &self.store_ids.name())
            .finish()
    }
}

impl NodeRefHasher for NodeRefRadixHasher {
    fn hash(&self, node: &NodeRef) -> Result<NodeRefHash, HashError> {
        let uuid = node
            .uuid()
            .ok_or_else(|| HashError::InvalidNodeId(node.id().to_string()))?;
        let protocol = Self::store_token(self.store_protocols.as_ref(), node.store().protocol())?;
        let identifier = Self::store_token(self.store_ids.as_ref(), node.store().identifier())?;
        Ok(NodeRefHash {
            store: protocol + &identifier,
            node: self.encode_id(uuid.as_u128()),
        })
    }

    fn lookup(&self, hash: &NodeRefHash) -> Result<NodeRef, HashError> {
        if hash.store.len() != NodeRefHash::STORE_HASH_LEN || !hash.store.is_ascii() {
            return Err(HashError::InvalidStoreHash(hash.store.clone()));
        }
        let (protocol_hash, identifier_hash) = hash.store.split_at(1);
        let protocol = Self::store_value(self.store_protocols.as_ref(), protocol_hash)?;
        let identifier = Self::store_value(self.store_ids.as_ref(), identifier_hash)?;
        let id = self.decode_id(&hash.node)?;
        let store = StoreRef::new(protocol, identifier)?;
        Ok(NodeRef::from_uuid(store, Uuid::from_u128(id)))
    }
}
