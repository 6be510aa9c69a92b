//! Decoding of hash-encoded references.

use std::sync::Arc;

use tracing::{debug, trace};
use vref_store::HashStores;
use vref_types::{Protocol, Reference, Resource};

use crate::artefact::{protocol_from_code, ResourceCode, MAX_NESTING, TEMPLATE_PATH_SEPARATOR};
use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::hasher::{
    NodeRefHash, NodeRefHasher, NodeRefRadixHasher, PathHash, PathHasher, StoredPathHasher,
};

/// Decodes resources and references from a token stream.
///
/// The parser holds no per-parse state and may be shared between threads;
/// each parse owns its [`Cursor`].
#[derive(Clone)]
pub struct ProtocolHashParser {
    classpath: Arc<dyn PathHasher>,
    repository_path: Arc<dyn PathHasher>,
    node_refs: Arc<dyn NodeRefHasher>,
}

impl ProtocolHashParser {
    pub fn new(
        classpath: Arc<dyn PathHasher>,
        repository_path: Arc<dyn PathHasher>,
        node_refs: Arc<dyn NodeRefHasher>,
    ) -> Self {
        Self {
            classpath,
            repository_path,
            node_refs,
        }
    }

    /// Stored path hashers over `stores` and the radix-36 node hasher.
    pub fn from_stores(stores: &HashStores) -> Self {
        Self::new(
            Arc::new(StoredPathHasher::new(Arc::clone(&stores.classpath))),
            Arc::new(StoredPathHasher::new(Arc::clone(&stores.repository_path))),
            Arc::new(NodeRefRadixHasher::radix_36(stores)),
        )
    }

    /// Decode one resource run: a [`ResourceCode`] and its tokens.
    pub fn parse_resource(&self, cursor: &mut Cursor<'_>) -> Result<Resource> {
        let position = cursor.position();
        let token = cursor.next_token()?;
        let Some(code) = ResourceCode::from_token(token) else {
            debug!(token, position, "unknown resource code");
            return Err(ParseError::UnknownResourceCode {
                token: token.to_string(),
                position,
            });
        };
        trace!(?code, position, "parsing resource");

        let resource = match code {
            ResourceCode::RepositoryNodeRef => {
                let position = cursor.position();
                let token = cursor.next_token()?;
                let hash = NodeRefHash::split(token).ok_or_else(|| ParseError::MalformedToken {
                    token: token.to_string(),
                    position,
                    reason: "node hash needs a two-character store hash and a node id",
                })?;
                Resource::node(self.node_refs.lookup(&hash)?)
            }
            ResourceCode::HashedClasspath => {
                let hash = PathHash::hashed(cursor.next_token()?);
                Resource::classpath(self.classpath.lookup(&hash)?)
            }
            ResourceCode::MixedClasspath => {
                let hash = PathHash::mixed(cursor.next_token()?, cursor.next_token()?);
                Resource::classpath(self.classpath.lookup(&hash)?)
            }
            ResourceCode::Classpath => {
                let hash = PathHash::plain(cursor.next_token()?);
                Resource::classpath(self.classpath.lookup(&hash)?)
            }
            ResourceCode::HashedRepositoryPath => {
                let hash = PathHash::hashed(cursor.next_token()?);
                Resource::repository_path(self.repository_path.lookup(&hash)?)
            }
            ResourceCode::MixedRepositoryPath => {
                let hash = PathHash::mixed(cursor.next_token()?, cursor.next_token()?);
                Resource::repository_path(self.repository_path.lookup(&hash)?)
            }
            ResourceCode::RepositoryPath => {
                let hash = PathHash::plain(cursor.next_token()?);
                Resource::repository_path(self.repository_path.lookup(&hash)?)
            }
        };
        Ok(resource)
    }

    /// Decode a complete reference. Every token must be consumed.
    pub fn parse(&self, encoded: &str) -> Result<Reference> {
        let mut cursor = Cursor::tokenize(encoded);
        let reference = self.parse_reference(&mut cursor)?;
        cursor.expect_end()?;
        debug!(protocol = ?reference.protocol, "parsed reference");
        Ok(reference)
    }

    /// Decode a reference starting at the cursor, leaving any later tokens.
    pub fn parse_reference(&self, cursor: &mut Cursor<'_>) -> Result<Reference> {
        self.parse_nested(cursor, 0)
    }

    fn parse_nested(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Reference> {
        if depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { limit: MAX_NESTING });
        }

        let position = cursor.position();
        let token = cursor.next_token()?;
        let protocol = protocol_from_code(token).ok_or_else(|| ParseError::UnknownProtocolCode {
            token: token.to_string(),
            position,
        })?;
        trace!(?protocol, position, depth, "parsing reference");

        let reference = match protocol {
            Protocol::Virtual => {
                let template = self.parse_resource(cursor)?;
                let template_path = parse_template_path(cursor)?;
                let actual = self.parse_resource(cursor)?;
                Reference::virtual_ref(template, template_path, actual)
            }
            Protocol::Node => {
                let node = self.parse_resource(cursor)?;
                let parent = self.parse_nested(cursor, depth + 1)?;
                Reference::node_ref(node, parent)
            }
            Protocol::Vanilla => {
                let template = self.parse_resource(cursor)?;
                let template_path = parse_template_path(cursor)?;
                let actual = self.parse_resource(cursor)?;
                let vanilla = self.parse_resource(cursor)?;
                Reference::vanilla_ref(template, template_path, actual, vanilla)
            }
        };
        Ok(reference)
    }
}

fn parse_template_path(cursor: &mut Cursor<'_>) -> Result<String> {
    let token = cursor.next_token()?;
    Ok(token.replace(TEMPLATE_PATH_SEPARATOR, "/"))
}

impl std::fmt::Debug for ProtocolHashParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolHashParser").finish_non_exhaustive()
    }
}
