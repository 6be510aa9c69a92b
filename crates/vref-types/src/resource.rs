//! Decoded reference targets.
//!
//! A [`Resource`] is closed over three shapes, so it is a plain enum and every
//! consumer matches it exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeRef;

/// A location inside the content repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepositoryLocation {
    /// A node addressed by its node reference.
    Node(NodeRef),
    /// A node addressed by its repository path (e.g. `/app:company_home/x`).
    Path(String),
}

/// The target a reference resolves to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Content stored in the repository.
    Repository(RepositoryLocation),
    /// Content bundled on the application classpath.
    Classpath(String),
}

impl Resource {
    /// A repository resource addressed by node reference.
    pub fn node(node: NodeRef) -> Self {
        Resource::Repository(RepositoryLocation::Node(node))
    }

    /// A repository resource addressed by path.
    pub fn repository_path(path: impl Into<String>) -> Self {
        Resource::Repository(RepositoryLocation::Path(path.into()))
    }

    /// A classpath resource.
    pub fn classpath(path: impl Into<String>) -> Self {
        Resource::Classpath(path.into())
    }

    /// Returns the node reference if this resource is addressed by one.
    pub fn node_ref(&self) -> Option<&NodeRef> {
        match self {
            Resource::Repository(RepositoryLocation::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// Returns the repository path if this resource is addressed by one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Resource::Repository(RepositoryLocation::Path(path)) => Some(path),
            _ => None,
        }
    }

    /// Returns the classpath location if this is a classpath resource.
    pub fn classpath_location(&self) -> Option<&str> {
        match self {
            Resource::Classpath(path) => Some(path),
            _ => None,
        }
    }

    /// Returns `true` if this resource lives in the repository.
    pub fn is_repository(&self) -> bool {
        matches!(self, Resource::Repository(_))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Repository(RepositoryLocation::Node(node)) => write!(f, "node:{node}"),
            Resource::Repository(RepositoryLocation::Path(path)) => write!(f, "path:{path}"),
            Resource::Classpath(path) => write!(f, "classpath:{path}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let node: NodeRef = "workspace://SpacesStore/abc".parse().unwrap();
        let r = Resource::node(node.clone());
        assert_eq!(r.node_ref(), Some(&node));
        assert!(r.path().is_none());
        assert!(r.is_repository());

        let p = Resource::repository_path("/app:company_home");
        assert_eq!(p.path(), Some("/app:company_home"));
        assert!(p.node_ref().is_none());

        let c = Resource::classpath("com/example/Foo.class");
        assert_eq!(c.classpath_location(), Some("com/example/Foo.class"));
        assert!(!c.is_repository());
    }

    #[test]
    fn display_is_tagged() {
        assert_eq!(Resource::classpath("a/b").to_string(), "classpath:a/b");
        assert_eq!(Resource::repository_path("/x").to_string(), "path:/x");
    }
}
