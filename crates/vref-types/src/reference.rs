//! Protocol-qualified references.
//!
//! A [`Reference`] names a protocol, the resource it is anchored on and an
//! ordered list of protocol-specific parameters. The parameter layout is fixed
//! per protocol:
//!
//! | protocol  | resource       | parameters                                  |
//! |-----------|----------------|---------------------------------------------|
//! | `Virtual` | template       | template path, actual node resource         |
//! | `Node`    | node           | parent reference                            |
//! | `Vanilla` | template       | template path, actual node, vanilla resource|

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// The protocol a reference is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// A virtual folder produced by applying a template to an actual node.
    Virtual,
    /// A real node seen through a virtual parent.
    Node,
    /// A virtual folder driven by a vanilla (JSON) template descriptor.
    Vanilla,
}

/// A protocol-specific parameter of a [`Reference`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parameter {
    Resource(Resource),
    Reference(Box<Reference>),
    String(String),
}

/// A decoded reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub protocol: Protocol,
    pub resource: Resource,
    pub parameters: Vec<Parameter>,
}

impl Reference {
    /// A virtual-protocol reference.
    pub fn virtual_ref(template: Resource, template_path: impl Into<String>, actual: Resource) -> Self {
        Self {
            protocol: Protocol::Virtual,
            resource: template,
            parameters: vec![
                Parameter::String(template_path.into()),
                Parameter::Resource(actual),
            ],
        }
    }

    /// A node-protocol reference: `node` as seen beneath `parent`.
    pub fn node_ref(node: Resource, parent: Reference) -> Self {
        Self {
            protocol: Protocol::Node,
            resource: node,
            parameters: vec![Parameter::Reference(Box::new(parent))],
        }
    }

    /// A vanilla-protocol reference.
    pub fn vanilla_ref(
        template: Resource,
        template_path: impl Into<String>,
        actual: Resource,
        vanilla: Resource,
    ) -> Self {
        Self {
            protocol: Protocol::Vanilla,
            resource: template,
            parameters: vec![
                Parameter::String(template_path.into()),
                Parameter::Resource(actual),
                Parameter::Resource(vanilla),
            ],
        }
    }

    /// The template path of a virtual or vanilla reference.
    pub fn template_path(&self) -> Option<&str> {
        match (self.protocol, self.parameters.first()) {
            (Protocol::Virtual | Protocol::Vanilla, Some(Parameter::String(path))) => Some(path),
            _ => None,
        }
    }

    /// The actual node resource of a virtual or vanilla reference.
    pub fn actual_resource(&self) -> Option<&Resource> {
        match (self.protocol, self.parameters.get(1)) {
            (Protocol::Virtual | Protocol::Vanilla, Some(Parameter::Resource(r))) => Some(r),
            _ => None,
        }
    }

    /// The vanilla descriptor resource of a vanilla reference.
    pub fn vanilla_resource(&self) -> Option<&Resource> {
        match (self.protocol, self.parameters.get(2)) {
            (Protocol::Vanilla, Some(Parameter::Resource(r))) => Some(r),
            _ => None,
        }
    }

    /// The parent reference of a node reference.
    pub fn parent(&self) -> Option<&Reference> {
        match (self.protocol, self.parameters.first()) {
            (Protocol::Node, Some(Parameter::Reference(parent))) => Some(parent),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Resource {
        Resource::classpath("/org/alfresco/repo/virtual/template/smartFolder.js")
    }

    fn actual() -> Resource {
        Resource::node("workspace://SpacesStore/abc".parse().unwrap())
    }

    #[test]
    fn virtual_accessors() {
        let r = Reference::virtual_ref(template(), "/1/2", actual());
        assert_eq!(r.protocol, Protocol::Virtual);
        assert_eq!(r.template_path(), Some("/1/2"));
        assert_eq!(r.actual_resource(), Some(&actual()));
        assert!(r.vanilla_resource().is_none());
        assert!(r.parent().is_none());
    }

    #[test]
    fn vanilla_accessors() {
        let vanilla = Resource::repository_path("/app:company_home/descriptor.json");
        let r = Reference::vanilla_ref(template(), "/", actual(), vanilla.clone());
        assert_eq!(r.template_path(), Some("/"));
        assert_eq!(r.vanilla_resource(), Some(&vanilla));
    }

    #[test]
    fn node_accessors() {
        let parent = Reference::virtual_ref(template(), "/1", actual());
        let r = Reference::node_ref(actual(), parent.clone());
        assert_eq!(r.parent(), Some(&parent));
        assert!(r.template_path().is_none());
        assert!(r.actual_resource().is_none());
    }
}
