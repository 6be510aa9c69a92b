//! Error types for reference encoding and parsing.

use thiserror::Error;
use vref_store::StoreError;
use vref_types::{Protocol, TypeError};

/// Failures inside a hasher: unknown tokens, unhashable values, bad digits.
#[derive(Debug, Error)]
pub enum HashError {
    /// A hash token has no mapping in its store.
    #[error("unknown hash {hash:?} in {store} store")]
    UnknownHash { store: String, hash: String },

    /// A value that must be hashed has no registered token.
    #[error("no hash registered for {value:?} in {store} store")]
    MissingHash { store: String, value: String },

    /// A path pair carried neither a hash nor a literal.
    #[error("path hash has neither a hash nor a literal component")]
    EmptyPair,

    /// The empty path cannot be hashed.
    #[error("cannot hash an empty path")]
    EmptyPath,

    /// Radix hashing needs a canonical hyphenated UUID node id.
    #[error("node id {0:?} is not a canonical UUID")]
    InvalidNodeId(String),

    /// The node part of a node hash is not a valid number in the radix.
    #[error("invalid radix-{radix} node hash {hash:?}")]
    InvalidNodeHash { radix: u32, hash: String },

    /// Store hashes are exactly two single-character tokens.
    #[error("invalid store hash {0:?}")]
    InvalidStoreHash(String),

    #[error("radix {0} outside 2..=36")]
    InvalidRadix(u32),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// A reference could not be decoded.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The leading token of a resource run is not a resource code.
    #[error("unknown resource token {token:?} at {position}")]
    UnknownResourceCode { token: String, position: usize },

    /// The leading token of a reference is not a protocol code.
    #[error("unknown protocol token {token:?} at {position}")]
    UnknownProtocolCode { token: String, position: usize },

    /// A token was required but the stream is exhausted.
    #[error("unexpected end of reference: token {position} required")]
    Exhausted { position: usize },

    /// Tokens remain after a complete reference was read.
    #[error("{remaining} unexpected trailing token(s) at {position}")]
    TrailingTokens { position: usize, remaining: usize },

    /// A token has the wrong shape for its position.
    #[error("malformed token {token:?} at {position}: {reason}")]
    MalformedToken {
        token: String,
        position: usize,
        reason: &'static str,
    },

    /// Node references nest deeper than the codec allows.
    #[error("reference nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// A reference could not be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A literal path segment would split into several tokens.
    #[error("literal {0:?} contains the token delimiter")]
    DelimiterInLiteral(String),

    /// Template paths may not use the characters reserved for their wire form.
    #[error("template path {0:?} contains a reserved character")]
    InvalidTemplatePath(String),

    /// The parameter list does not match the protocol's layout.
    #[error("malformed parameters for {0:?} reference")]
    MalformedParameters(Protocol),

    #[error("reference nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Convenience type alias for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;
