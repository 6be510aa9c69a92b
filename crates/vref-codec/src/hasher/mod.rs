//! Value hashers.
//!
//! A hasher turns a value into a lookup pair and back. Path hashers go
//! through a [`HashStore`](vref_store::HashStore); the node reference hasher
//! is closed-form apart from its two single-character store tables.

mod node;
mod path;

pub use node::{NodeRefHasher, NodeRefRadixHasher};
pub use path::{PathHasher, StoredPathHasher};

use crate::artefact::PathShape;

/// Lookup pair for a path: a hash token for a stored prefix (or the whole
/// path) and the literal remainder. `None` marks a component that is absent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathHash {
    pub hash: Option<String>,
    pub literal: Option<String>,
}

impl PathHash {
    /// The whole path is covered by `hash`.
    pub fn hashed(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            literal: None,
        }
    }

    /// A stored prefix followed by a literal remainder.
    pub fn mixed(hash: impl Into<String>, literal: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            literal: Some(literal.into()),
        }
    }

    /// No part of the path is stored.
    pub fn plain(literal: impl Into<String>) -> Self {
        Self {
            hash: None,
            literal: Some(literal.into()),
        }
    }

    /// The wire shape of this pair; `None` if both components are absent.
    pub fn shape(&self) -> Option<PathShape> {
        match (&self.hash, &self.literal) {
            (Some(_), None) => Some(PathShape::Hashed),
            (Some(_), Some(_)) => Some(PathShape::Mixed),
            (None, Some(_)) => Some(PathShape::Plain),
            (None, None) => None,
        }
    }
}

/// Lookup pair for a node reference: the two-character store hash and the
/// radix-encoded node id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRefHash {
    pub store: String,
    pub node: String,
}

impl NodeRefHash {
    /// Width of the store hash prefix in a combined token.
    pub const STORE_HASH_LEN: usize = 2;

    /// Split a combined token into store hash and node hash.
    ///
    /// Returns `None` unless the token has a two-byte prefix on a character
    /// boundary followed by a non-empty node hash.
    pub fn split(token: &str) -> Option<Self> {
        if token.len() <= Self::STORE_HASH_LEN || !token.is_char_boundary(Self::STORE_HASH_LEN) {
            return None;
        }
        let (store, node) = token.split_at(Self::STORE_HASH_LEN);
        Some(Self {
            store: store.to_string(),
            node: node.to_string(),
        })
    }

    /// The combined wire token.
    pub fn joined(&self) -> String {
        format!("{}{}", self.store, self.node)
    }
}
