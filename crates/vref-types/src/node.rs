use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Separator between a store protocol and its identifier.
const PROTOCOL_SEPARATOR: &str = "://";

/// Address of a repository store, e.g. `workspace://SpacesStore`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoreRef {
    protocol: String,
    identifier: String,
}

impl StoreRef {
    /// Create a store reference from its two components.
    ///
    /// Neither component may be empty, and neither may contain `/`.
    pub fn new(protocol: impl Into<String>, identifier: impl Into<String>) -> Result<Self, TypeError> {
        let protocol = protocol.into();
        let identifier = identifier.into();
        if protocol.is_empty()
            || identifier.is_empty()
            || protocol.contains('/')
            || identifier.contains('/')
        {
            return Err(TypeError::InvalidStoreRef(format!(
                "{protocol}{PROTOCOL_SEPARATOR}{identifier}"
            )));
        }
        Ok(Self {
            protocol,
            identifier,
        })
    }

    /// The store protocol (e.g. `workspace`).
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// The store identifier (e.g. `SpacesStore`).
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PROTOCOL_SEPARATOR}{}", self.protocol, self.identifier)
    }
}

impl FromStr for StoreRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, identifier) = s
            .split_once(PROTOCOL_SEPARATOR)
            .ok_or_else(|| TypeError::InvalidStoreRef(s.to_string()))?;
        Self::new(protocol, identifier)
    }
}

/// Address of a node inside a store, e.g.
/// `workspace://SpacesStore/0d3b26ff-c4c1-4680-8622-8608ea7ab4b2`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    store: StoreRef,
    id: String,
}

impl NodeRef {
    /// Create a node reference. The id must be non-empty and free of `/`.
    pub fn new(store: StoreRef, id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() || id.contains('/') {
            return Err(TypeError::InvalidNodeRef(format!("{store}/{id}")));
        }
        Ok(Self { store, id })
    }

    /// Create a node reference whose id is the hyphenated form of `uuid`.
    pub fn from_uuid(store: StoreRef, uuid: Uuid) -> Self {
        Self {
            store,
            id: uuid.hyphenated().to_string(),
        }
    }

    /// The store this node lives in.
    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    /// The node id within its store.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node id as a UUID, if it is in canonical lower-case hyphenated form.
    pub fn uuid(&self) -> Option<Uuid> {
        let uuid = Uuid::try_parse(&self.id).ok()?;
        (uuid.hyphenated().to_string() == self.id).then_some(uuid)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.store, self.id)
    }
}

impl FromStr for NodeRef {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (protocol, rest) = s
            .split_once(PROTOCOL_SEPARATOR)
            .ok_or_else(|| TypeError::InvalidNodeRef(s.to_string()))?;
        let (identifier, id) = rest
            .split_once('/')
            .ok_or_else(|| TypeError::InvalidNodeRef(s.to_string()))?;
        let store =
            StoreRef::new(protocol, identifier).map_err(|_| TypeError::InvalidNodeRef(s.to_string()))?;
        Self::new(store, id)
    }
}
