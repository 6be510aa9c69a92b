//! Encoding of references into their hash-token form.
//!
//! The encoder mirrors [`ProtocolHashParser`](crate::ProtocolHashParser):
//! for any reference it accepts, parsing its output with a parser over the
//! same stores yields the reference back.

use std::sync::Arc;

use tracing::{debug, trace};
use vref_store::HashStores;
use vref_types::{Parameter, Protocol, Reference, RepositoryLocation, Resource};

use crate::artefact::{
    protocol_code, PathKind, PathShape, ResourceCode, DELIMITER, MAX_NESTING,
    TEMPLATE_PATH_SEPARATOR,
};
use crate::error::{EncodeError, HashError};
use crate::hasher::{NodeRefHasher, NodeRefRadixHasher, PathHasher, StoredPathHasher};

/// Encodes resources and references into delimited token strings.
#[derive(Clone)]
pub struct ProtocolHashEncoder {
    classpath: Arc<dyn PathHasher>,
    repository_path: Arc<dyn PathHasher>,
    node_refs: Arc<dyn NodeRefHasher>,
}

impl ProtocolHashEncoder {
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

    pub fn from_stores(stores: &HashStores) -> Self {
        Self::new(
            Arc::new(StoredPathHasher::new(Arc::clone(&stores.classpath))),
            Arc::new(StoredPathHasher::new(Arc::clone(&stores.repository_path))),
            Arc::new(NodeRefRadixHasher::radix_36(stores)),
        )
    }

    /// Encode a complete reference.
    pub fn encode(&self, reference: &Reference) -> Result<String, EncodeError> {
        let mut tokens = Vec::new();
        self.encode_reference(reference, 0, &mut tokens)?;
        let encoded = tokens.join(DELIMITER.to_string().as_str());
        debug!(protocol = ?reference.protocol, tokens = tokens.len(), "encoded reference");
        Ok(encoded)
    }

    /// Encode one resource run: its [`ResourceCode`] followed by its tokens.
    pub fn encode_resource(&self, resource: &Resource) -> Result<Vec<String>, EncodeError> {
        let mut tokens = Vec::with_capacity(3);
        self.push_resource(resource, &mut tokens)?;
        Ok(tokens)
    }

    fn encode_reference(
        &self,
        reference: &Reference,
        depth: usize,
        out: &mut Vec<String>,
    ) -> Result<(), EncodeError> {
        if depth >= MAX_NESTING {
            return Err(EncodeError::NestingTooDeep { limit: MAX_NESTING });
        }
        out.push(protocol_code(reference.protocol).to_string());
        self.push_resource(&reference.resource, out)?;

        match (reference.protocol, reference.parameters.as_slice()) {
            (Protocol::Virtual, [Parameter::String(path), Parameter::Resource(actual)]) => {
                out.push(template_path_token(path)?);
                self.push_resource(actual, out)?;
            }
            (Protocol::Node, [Parameter::Reference(parent)]) => {
                self.encode_reference(parent, depth + 1, out)?;
            }
            (
                Protocol::Vanilla,
                [Parameter::String(path), Parameter::Resource(actual), Parameter::Resource(vanilla)],
            ) => {
                out.push(template_path_token(path)?);
                self.push_resource(actual, out)?;
                self.push_resource(vanilla, out)?;
            }
            (protocol, _) => return Err(EncodeError::MalformedParameters(protocol)),
        }
        Ok(())
    }

    fn push_resource(&self, resource: &Resource, out: &mut Vec<String>) -> Result<(), EncodeError> {
        match resource {
            Resource::Repository(RepositoryLocation::Node(node)) => {
                let hash = self.node_refs.hash(node)?;
                out.push(ResourceCode::RepositoryNodeRef.as_str().to_string());
                out.push(hash.joined());
            }
            Resource::Repository(RepositoryLocation::Path(path)) => {
                self.push_path(PathKind::Repository, self.repository_path.as_ref(), path, out)?;
            }
            Resource::Classpath(path) => {
                self.push_path(PathKind::Classpath, self.classpath.as_ref(), path, out)?;
            }
        }
        Ok(())
    }

    fn push_path(
        &self,
        kind: PathKind,
        hasher: &dyn PathHasher,
        path: &str,
        out: &mut Vec<String>,
    ) -> Result<(), EncodeError> {
        let hash = hasher.hash(path)?;
        let shape = hash.shape().ok_or(HashError::EmptyPair)?;
        trace!(?kind, ?shape, path, "encoding path");

        out.push(ResourceCode::for_path(kind, shape).as_str().to_string());
        match shape {
            PathShape::Hashed => out.extend(hash.hash),
            PathShape::Mixed => {
                out.extend(hash.hash);
                out.push(literal_token(hash.literal)?);
            }
            PathShape::Plain => out.push(literal_token(hash.literal)?),
        }
        Ok(())
    }
}

fn literal_token(literal: Option<String>) -> Result<String, EncodeError> {
    let literal = literal.ok_or(HashError::EmptyPair)?;
    if literal.contains(DELIMITER) {
        return Err(EncodeError::DelimiterInLiteral(literal));
    }
    Ok(literal)
}

fn template_path_token(path: &str) -> Result<String, EncodeError> {
    if path.contains(TEMPLATE_PATH_SEPARATOR) || path.contains(DELIMITER) {
        return Err(EncodeError::InvalidTemplatePath(path.to_string()));
    }
    Ok(path.replace('/', &TEMPLATE_PATH_SEPARATOR.to_string()))
}

impl std::fmt::Debug for ProtocolHashEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolHashEncoder").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ProtocolHashParser;
    use proptest::prelude::*;
    use uuid::Uuid;
    use vref_store::HashStoreConfig;
    use vref_types::{NodeRef, StoreRef};

    const NODE: &str = "workspace://SpacesStore/0d3b26ff-c4c1-4680-8622-8608ea7ab4b2";

    fn stores() -> HashStores {
        let mut cfg = HashStoreConfig::default();
        cfg.classpath.insert("com/example/Foo.class".into(), "abc123".into());
        cfg.classpath.insert("com/example".into(), "ce".into());
        cfg.repository_path.insert("/app:company_home/docs".into(), "d".into());
        HashStores::from_config(&cfg).unwrap()
    }

    fn codec() -> (ProtocolHashEncoder, ProtocolHashParser) {
        let stores = stores();
        (
            ProtocolHashEncoder::from_stores(&stores),
            ProtocolHashParser::from_stores(&stores),
        )
    }

    fn node() -> Resource {
        Resource::node(NODE.parse().unwrap())
    }

    #[test]
    fn resource_shapes() {
        let (encoder, _) = codec();
        assert_eq!(
            encoder.encode_resource(&Resource::classpath("com/example/Foo.class")).unwrap(),
            vec!["4", "abc123"]
        );
        assert_eq!(
            encoder.encode_resource(&Resource::classpath("com/example/Bar.class")).unwrap(),
            vec!["5", "ce", "Bar.class"]
        );
        assert_eq!(
            encoder.encode_resource(&Resource::classpath("org/other/Baz.class")).unwrap(),
            vec!["6", "org/other/Baz.class"]
        );
        assert_eq!(
            encoder.encode_resource(&Resource::repository_path("/app:company_home")).unwrap(),
            vec!["1", "h"]
        );
        assert_eq!(
            encoder
                .encode_resource(&Resource::repository_path("/app:company_home/docs/a.pdf"))
                .unwrap(),
            vec!["2", "d", "a.pdf"]
        );
        assert_eq!(
            encoder.encode_resource(&Resource::repository_path("/x/y")).unwrap(),
            vec!["3", "/x/y"]
        );
        let tokens = encoder.encode_resource(&node()).unwrap();
        assert_eq!(tokens[0], "7");
        assert!(tokens[1].starts_with("11"));
    }

    #[test]
    fn virtual_reference_roundtrip() {
        let (encoder, parser) = codec();
        let template = Resource::classpath("/org/alfresco/repo/virtual/template/smartFolder.js");
        let reference = Reference::virtual_ref(template, "/1/2", node());
        let encoded = encoder.encode(&reference).unwrap();
        assert!(encoded.starts_with("v-5-t-smartFolder.js-.1.2-7-11"));
        assert_eq!(parser.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn node_and_vanilla_roundtrip() {
        let (encoder, parser) = codec();
        let template = Resource::classpath("/org/alfresco/repo/virtual/template");
        let vanilla = Resource::repository_path("/app:company_home/docs/vanilla.json");
        let parent = Reference::vanilla_ref(template, "/", node(), vanilla);
        let reference = Reference::node_ref(node(), parent);
        let encoded = encoder.encode(&reference).unwrap();
        assert_eq!(parser.parse(&encoded).unwrap(), reference);
    }

    #[test]
    fn literal_with_delimiter_is_rejected() {
        let (encoder, _) = codec();
        let err = encoder
            .encode_resource(&Resource::classpath("org/my-lib/X.class"))
            .unwrap_err();
        assert!(matches!(err, EncodeError::DelimiterInLiteral(_)));
    }

    #[test]
    fn reserved_template_path_characters() {
        let (encoder, _) = codec();
        for path in ["/a.b", "/a-b"] {
            let reference = Reference::virtual_ref(Resource::classpath("x"), path, node());
            assert!(matches!(
                encoder.encode(&reference),
                Err(EncodeError::InvalidTemplatePath(_))
            ));
        }
    }

    #[test]
    fn non_uuid_node_cannot_be_encoded() {
        let (encoder, _) = codec();
        let store = StoreRef::new("workspace", "SpacesStore").unwrap();
        let node = NodeRef::new(store, "company_home").unwrap();
        let err = encoder.encode_resource(&Resource::node(node)).unwrap_err();
        assert!(matches!(err, EncodeError::Hash(HashError::InvalidNodeId(_))));
    }

    #[test]
    fn malformed_parameters() {
        let (encoder, _) = codec();
        let reference = Reference {
            protocol: Protocol::Node,
            resource: node(),
            parameters: vec![Parameter::String("oops".into())],
        };
        assert!(matches!(
            encoder.encode(&reference),
            Err(EncodeError::MalformedParameters(Protocol::Node))
        ));
    }

    #[test]
    fn nesting_limit_matches_parser() {
        let (encoder, _) = codec();
        let mut reference = Reference::virtual_ref(Resource::classpath("x"), "/", node());
        for _ in 0..MAX_NESTING {
            reference = Reference::node_ref(node(), reference);
        }
        assert!(matches!(
            encoder.encode(&reference),
            Err(EncodeError::NestingTooDeep { .. })
        ));
    }

    fn path_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z]{1,6}(/[a-zA-Z0-9_.]{1,8}){0,4}",
            "/org/alfresco/repo/virtual/template(/[a-z0-9.]{1,8}){0,3}",
            "com/example(/[A-Za-z]{1,8}){0,2}",
            "/app:company_home(/docs)?(/[a-z0-9]{1,6}){0,3}",
        ]
    }

    proptest! {
        #[test]
        fn classpath_roundtrip(path in path_strategy()) {
            let (encoder, parser) = codec();
            let resource = Resource::classpath(path);
            let tokens = encoder.encode_resource(&resource).unwrap();
            let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
            let mut cursor = crate::Cursor::new(refs);
            prop_assert_eq!(parser.parse_resource(&mut cursor).unwrap(), resource);
            prop_assert!(cursor.is_exhausted());
        }

        #[test]
        fn repository_path_roundtrip(path in path_strategy()) {
            let (encoder, parser) = codec();
            let reference = Reference::virtual_ref(
                Resource::classpath("/org/alfresco/repo/virtual/template"),
                "/",
                Resource::repository_path(path),
            );
            let encoded = encoder.encode(&reference).unwrap();
            prop_assert_eq!(parser.parse(&encoded).unwrap(), reference);
        }

        #[test]
        fn node_roundtrip(id in any::<u128>(), archive in any::<bool>()) {
            let (encoder, parser) = codec();
            let protocol = if archive { "archive" } else { "workspace" };
            let store = StoreRef::new(protocol, "SpacesStore").unwrap();
            let node = Resource::node(NodeRef::from_uuid(store, Uuid::from_u128(id)));
            let reference = Reference::virtual_ref(Resource::classpath("x"), "/", node);
            let encoded = encoder.encode(&reference).unwrap();
            prop_assert_eq!(parser.parse(&encoded).unwrap(), reference);
        }

        #[test]
        fn unknown_codes_never_parse(code in "[0-9a-z]{1,3}") {
            prop_assume!(ResourceCode::from_token(&code).is_none());
            let (_, parser) = codec();
            let mut cursor = crate::Cursor::new(vec![code.as_str(), "t"]);
            let is_unknown_code = matches!(
                parser.parse_resource(&mut cursor),
                Err(crate::ParseError::UnknownResourceCode { .. })
            );
            prop_assert!(is_unknown_code);
        }
    }
}
