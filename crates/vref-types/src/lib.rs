//! Foundation types for virtual content references.
//!
//! This crate provides the identifiers and targets that every other `vref`
//! crate works with. A *reference* is decoded from a compact token string and
//! resolves to a *resource*: a repository node, a repository path, or a
//! classpath entry.
//!
//! # Key Types
//!
//! - [`StoreRef`] — A repository store address (`protocol://identifier`)
//! - [`NodeRef`] — A node address inside a store
//! - [`RepositoryLocation`] — A node or a path inside the repository
//! - [`Resource`] — The decoded target of a reference
//! - [`Reference`] — A protocol plus its resource and parameters

pub mod error;
pub mod node;
pub mod reference;
pub mod resource;

pub use error::TypeError;
pub use node::{NodeRef, StoreRef};
pub use reference::{Parameter, Protocol, Reference};
pub use resource::{RepositoryLocation, Resource};
