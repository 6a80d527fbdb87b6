//! Binding-specification tree vocabulary.
//!
//! The binding specification layers implementation hooks onto WebIDL: which
//! interface to bind, privately stored fields, per-property storage
//! overrides and verbatim getter/setter code blocks.
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::ast::{Node, NodeKind};
use crate::query;

pub type GenbindNode = Node<GenbindKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GenbindKind {
    Ident,
    String,
    Cblock,
    Webidlfile,
    Hdrcomment,
    Preamble,
    Binding,
    BindingType,
    BindingInterface,
    BindingPrivate,
    BindingInternal,
    BindingProperty,
    Modifier,
    Getter,
    Setter,
}

impl NodeKind for GenbindKind {
    const IDENT: Self = GenbindKind::Ident;

    fn as_str(self) -> &'static str {
        match self {
            GenbindKind::Ident => "IDENT",
            GenbindKind::String => "STRING",
            GenbindKind::Cblock => "CBLOCK",
            GenbindKind::Webidlfile => "WEBIDLFILE",
            GenbindKind::Hdrcomment => "HDRCOMMENT",
            GenbindKind::Preamble => "PREAMBLE",
            GenbindKind::Binding => "BINDING",
            GenbindKind::BindingType => "BINDING_TYPE",
            GenbindKind::BindingInterface => "BINDING_INTERFACE",
            GenbindKind::BindingPrivate => "BINDING_PRIVATE",
            GenbindKind::BindingInternal => "BINDING_INTERNAL",
            GenbindKind::BindingProperty => "BINDING_PROPERTY",
            GenbindKind::Modifier => "MODIFIER",
            GenbindKind::Getter => "GETTER",
            GenbindKind::Setter => "SETTER",
        }
    }
}

bitflags! {
    /// Storage classification of a property slot.
    ///
    /// The empty set means engine-managed shared storage with no backing
    /// field; the getter/setter manage any retained value themselves.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SharedModifier: u32 {
        /// Delegate to one getter/setter pair for the whole type.
        const TYPE_HANDLER = 0b01;
        /// Caller-owned storage, not shared across calls.
        const UNSHARED = 0b10;
        const TYPE_HANDLER_UNSHARED = Self::TYPE_HANDLER.bits() | Self::UNSHARED.bits();
    }
}

impl SharedModifier {
    pub fn from_node(node: &GenbindNode) -> Self {
        let bits = node.int().and_then(|value| u32::try_from(value).ok()).unwrap_or(0);
        Self::from_bits_truncate(bits)
    }
    pub fn is_type_handler(self) -> bool { self.contains(Self::TYPE_HANDLER) }
    pub fn is_shared(self) -> bool { !self.contains(Self::UNSHARED) }
}

/// Native-side field declared with `private` or `internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateField<'a> {
    pub c_type: &'a str,
    pub ident: &'a str,
}

impl<'a> PrivateField<'a> {
    fn from_node(node: &'a GenbindNode) -> Option<Self> {
        let c_type = query::find_first(&node.children, GenbindKind::String)?.text()?;
        Some(Self { c_type, ident: node.ident()? })
    }
}

/// `BINDING` block of a binding specification.
#[derive(Debug, Clone, Copy)]
pub struct BindingBlock<'a> {
    pub node: &'a GenbindNode,
}

impl<'a> BindingBlock<'a> {
    pub fn find(root: &'a [GenbindNode]) -> Option<Self> {
        query::find_first(root, GenbindKind::Binding).map(|node| Self { node })
    }

    pub fn members(&self) -> &'a [GenbindNode] { &self.node.children }

    /// Names of the top-level interfaces, in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        query::iter_kind(self.members(), GenbindKind::BindingInterface)
            .filter_map(|node| node.ident().or(node.text()))
    }

    pub fn binding_type(&self) -> Option<&'a str> {
        query::find_first(self.members(), GenbindKind::BindingType).and_then(|node| node.ident().or(node.text()))
    }

    pub fn private_fields(&self) -> impl Iterator<Item = PrivateField<'a>> + use<'a> {
        query::iter_kind(self.members(), GenbindKind::BindingPrivate).filter_map(PrivateField::from_node)
    }

    pub fn internal_fields(&self) -> impl Iterator<Item = PrivateField<'a>> + use<'a> {
        query::iter_kind(self.members(), GenbindKind::BindingInternal).filter_map(PrivateField::from_node)
    }

    pub fn internal_field(&self, ident: &str) -> Option<&'a GenbindNode> {
        query::find_first_ident(self.members(), GenbindKind::BindingInternal, ident)
    }

    /// True when objects carry a private record (any private or internal field).
    pub fn has_private_storage(&self) -> bool {
        self.members()
            .iter()
            .any(|node| matches!(node.kind, GenbindKind::BindingPrivate | GenbindKind::BindingInternal))
    }
}

/// Text of every `CBLOCK` child, in order.
pub fn code_blocks(node: &GenbindNode) -> impl Iterator<Item = &str> {
    query::iter_kind(&node.children, GenbindKind::Cblock).filter_map(|block| block.text())
}
