//! Hash encoding of virtual content references.
//!
//! An encoded reference is a run of tokens joined by [`DELIMITER`]. The first
//! token names the protocol; each resource inside it starts with a
//! [`ResourceCode`] followed by one or two tokens:
//!
//! ```text
//! v-4-t-.1.2-7-11x2mj3lq6p9h1r0u4kbbvquma
//! │ │ │ │    │ └ store hash "11" + radix-36 node id
//! │ │ │ │    └ repository node code
//! │ │ │ └ template path "/1/2"
//! │ │ └ hash token resolved through the classpath store
//! │ └ hashed classpath code
//! └ virtual protocol
//! ```
//!
//! Path resources come in three shapes so a reference stays compact when the
//! path (or a prefix of it) is registered in a [`HashStore`], and still
//! encodes when it is not:
//!
//! - *hashed*: one token, the hash of the whole path
//! - *mixed*: the hash of a prefix, then the literal remainder
//! - *plain*: the literal path
//!
//! Node references are decoded in closed form by [`NodeRefRadixHasher`].
//!
//! # Modules
//!
//! - [`artefact`] — Delimiter and code tables
//! - [`cursor`] — The [`Cursor`] token reader
//! - [`hasher`] — [`PathHasher`] and [`NodeRefHasher`] implementations
//! - [`parser`] — [`ProtocolHashParser`]
//! - [`encoder`] — [`ProtocolHashEncoder`]
//!
//! [`HashStore`]: vref_store::HashStore

pub mod artefact;
pub mod cursor;
pub mod encoder;
pub mod error;
pub mod hasher;
pub mod parser;

pub use artefact::{PathKind, PathShape, ResourceCode, DELIMITER};
pub use cursor::Cursor;
pub use encoder::ProtocolHashEncoder;
pub use error::{EncodeError, HashError, ParseError, Result};
pub use hasher::{
    NodeRefHash, NodeRefHasher, NodeRefRadixHasher, PathHash, PathHasher, StoredPathHasher,
};
pub use parser::ProtocolHashParser;
