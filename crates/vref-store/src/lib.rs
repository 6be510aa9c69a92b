//! Hash stores for virtual reference encoding.
//!
//! A hash store is a bidirectional mapping between a long value (a classpath
//! location, a repository path prefix, a store protocol) and the short token
//! that stands in for it inside an encoded reference. Encoders ask for the
//! token of a value; decoders resolve a token back to its value.
//!
//! # Storage Backends
//!
//! All backends implement the [`HashStore`] trait:
//!
//! - [`InMemoryHashStore`] -- `HashMap`-based store, seeded from configuration
//!
//! # Design Rules
//!
//! 1. The mapping is a bijection: a value has at most one token and a token
//!    names at most one value.
//! 2. Entries are only ever added; re-adding an identical entry is a no-op.
//! 3. Concurrent reads are always safe.
//! 4. Tokens are ASCII alphanumeric so they can be embedded in any token run.

pub mod config;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::{HashStoreConfig, HashStores};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryHashStore;
pub use traits::HashStore;
