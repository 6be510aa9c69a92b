//! Wire constants shared by the parser and the encoder.

use vref_types::Protocol;

/// Separates tokens in an encoded reference.
pub const DELIMITER: char = '-';

/// Stands in for `/` inside template path tokens.
pub const TEMPLATE_PATH_SEPARATOR: char = '.';

/// Maximum depth of nested node-protocol parents.
pub const MAX_NESTING: usize = 32;

/// Leading token of a resource run. Each code fixes the shape of the tokens
/// that follow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceCode {
    /// `1`: one hash token for the whole repository path.
    HashedRepositoryPath,
    /// `2`: repository path prefix hash, then the literal remainder.
    MixedRepositoryPath,
    /// `3`: the literal repository path.
    RepositoryPath,
    /// `4`: one hash token for the whole classpath location.
    HashedClasspath,
    /// `5`: classpath prefix hash, then the literal remainder.
    MixedClasspath,
    /// `6`: the literal classpath location.
    Classpath,
    /// `7`: store hash and radix node id in one token.
    RepositoryNodeRef,
}

/// Which path hasher a path resource goes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathKind {
    Classpath,
    Repository,
}

/// How much of a path is covered by a hash token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathShape {
    Hashed,
    Mixed,
    Plain,
}

impl ResourceCode {
    pub const ALL: [ResourceCode; 7] = [
        ResourceCode::HashedRepositoryPath,
        ResourceCode::MixedRepositoryPath,
        ResourceCode::RepositoryPath,
        ResourceCode::HashedClasspath,
        ResourceCode::MixedClasspath,
        ResourceCode::Classpath,
        ResourceCode::RepositoryNodeRef,
    ];

    /// The token for this code.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceCode::HashedRepositoryPath => "1",
            ResourceCode::MixedRepositoryPath => "2",
            ResourceCode::RepositoryPath => "3",
            ResourceCode::HashedClasspath => "4",
            ResourceCode::MixedClasspath => "5",
            ResourceCode::Classpath => "6",
            ResourceCode::RepositoryNodeRef => "7",
        }
    }

    /// The code a token stands for, if any. Matching is exact.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.as_str() == token)
    }

    /// The code for a path resource of the given kind and shape.
    pub fn for_path(kind: PathKind, shape: PathShape) -> Self {
        match (kind, shape) {
            (PathKind::Repository, PathShape::Hashed) => ResourceCode::HashedRepositoryPath,
            (PathKind::Repository, PathShape::Mixed) => ResourceCode::MixedRepositoryPath,
            (PathKind::Repository, PathShape::Plain) => ResourceCode::RepositoryPath,
            (PathKind::Classpath, PathShape::Hashed) => ResourceCode::HashedClasspath,
            (PathKind::Classpath, PathShape::Mixed) => ResourceCode::MixedClasspath,
            (PathKind::Classpath, PathShape::Plain) => ResourceCode::Classpath,
        }
    }
}

/// The token for a protocol.
pub fn protocol_code(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Virtual => "v",
        Protocol::Node => "n",
        Protocol::Vanilla => "e",
    }
}

/// The protocol a token stands for, if any.
pub fn protocol_from_code(token: &str) -> Option<Protocol> {
    [Protocol::Virtual, Protocol::Node, Protocol::Vanilla]
        .into_iter()
        .find(|p| protocol_code(*p) == token)
}
