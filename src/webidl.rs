//! WebIDL tree vocabulary and the typed attribute view.
use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::ast::{Node, NodeKind};
use crate::query;

pub type WebidlNode = Node<WebidlKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebidlKind {
    Ident,
    Interface,
    InterfaceInheritance,
    InterfaceImplements,
    List,
    Attribute,
    Operation,
    Const,
    Type,
    TypeBase,
    Modifier,
}

impl NodeKind for WebidlKind {
    const IDENT: Self = WebidlKind::Ident;

    fn as_str(self) -> &'static str {
        match self {
            WebidlKind::Ident => "IDENT",
            WebidlKind::Interface => "INTERFACE",
            WebidlKind::InterfaceInheritance => "INTERFACE_INHERITANCE",
            WebidlKind::InterfaceImplements => "INTERFACE_IMPLEMENTS",
            WebidlKind::List => "LIST",
            WebidlKind::Attribute => "ATTRIBUTE",
            WebidlKind::Operation => "OPERATION",
            WebidlKind::Const => "CONST",
            WebidlKind::Type => "TYPE",
            WebidlKind::TypeBase => "TYPE_BASE",
            WebidlKind::Modifier => "MODIFIER",
        }
    }
}

/// Base category carried by a `TYPE_BASE` node (integer encoding in order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeBase {
    User,
    Bool,
    Byte,
    Octet,
    Float,
    Double,
    Short,
    Long,
    LongLong,
    String,
    Sequence,
    Object,
    Date,
    Void,
}

impl TypeBase {
    const ALL: [TypeBase; 14] = [
        TypeBase::User,
        TypeBase::Bool,
        TypeBase::Byte,
        TypeBase::Octet,
        TypeBase::Float,
        TypeBase::Double,
        TypeBase::Short,
        TypeBase::Long,
        TypeBase::LongLong,
        TypeBase::String,
        TypeBase::Sequence,
        TypeBase::Object,
        TypeBase::Date,
        TypeBase::Void,
    ];

    pub fn from_int(value: i64) -> Option<Self> {
        usize::try_from(value).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn as_int(self) -> i64 {
        self as i64
    }

    /// WebIDL spelling of the category. `User` has no fixed spelling.
    pub fn idl_name(self, unsigned: bool) -> Option<&'static str> {
        Some(match (self, unsigned) {
            (TypeBase::User, _) => return None,
            (TypeBase::Bool, _) => "boolean",
            (TypeBase::Byte, _) => "byte",
            (TypeBase::Octet, _) => "octet",
            (TypeBase::Float, _) => "float",
            (TypeBase::Double, _) => "double",
            (TypeBase::Short, false) => "short",
            (TypeBase::Short, true) => "unsigned short",
            (TypeBase::Long, false) => "long",
            (TypeBase::Long, true) => "unsigned long",
            (TypeBase::LongLong, false) => "long long",
            (TypeBase::LongLong, true) => "unsigned long long",
            (TypeBase::String, _) => "DOMString",
            (TypeBase::Sequence, _) => "sequence",
            (TypeBase::Object, _) => "object",
            (TypeBase::Date, _) => "Date",
            (TypeBase::Void, _) => "void",
        })
    }
}

/// Integer values carried by WebIDL `MODIFIER` nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdlModifier {
    None = 0,
    Unsigned = 1,
    Unrestricted = 2,
    Readonly = 3,
}

impl IdlModifier {
    pub fn of(node: Option<&WebidlNode>) -> Self {
        match node.and_then(Node::int) {
            Some(1) => IdlModifier::Unsigned,
            Some(2) => IdlModifier::Unrestricted,
            Some(3) => IdlModifier::Readonly,
            _ => IdlModifier::None,
        }
    }
}

/// Resolved declared type of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdlType<'a> {
    /// `None` when the `TYPE_BASE` is missing or carries an unknown value.
    pub base: Option<TypeBase>,
    pub unsigned: bool,
    /// Name of a user-defined type.
    pub user_name: Option<&'a str>,
}

impl<'a> IdlType<'a> {
    pub fn from_node(type_node: Option<&'a WebidlNode>) -> Self {
        let Some(type_node) = type_node else {
            return Self { base: None, unsigned: false, user_name: None };
        };
        let base = query::find_first(&type_node.children, WebidlKind::TypeBase)
            .and_then(Node::int)
            .and_then(TypeBase::from_int);
        let modifier = IdlModifier::of(query::find_first(&type_node.children, WebidlKind::Modifier));
        Self {
            base,
            unsigned: modifier == IdlModifier::Unsigned,
            user_name: type_node.ident(),
        }
    }

    /// Key used for type-keyed overrides: the user type name, else the
    /// WebIDL spelling of the base category.
    pub fn name(&self) -> Option<Cow<'a, str>> {
        if let Some(user) = self.user_name {
            return Some(Cow::Borrowed(user));
        }
        self.base.and_then(|b| b.idl_name(self.unsigned)).map(Cow::Borrowed)
    }
}

/// Typed view of an `ATTRIBUTE` node.
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    pub node: &'a WebidlNode,
    pub ident: &'a str,
    pub ty: IdlType<'a>,
    pub readonly: bool,
}

impl<'a> Attribute<'a> {
    /// `None` when the attribute has no (or an empty) identifier.
    pub fn from_node(node: &'a WebidlNode) -> Option<Self> {
        let ident = node.ident().filter(|ident| !ident.is_empty())?;
        let ty = IdlType::from_node(query::find_first(&node.children, WebidlKind::Type));
        let readonly = IdlModifier::of(query::find_first(&node.children, WebidlKind::Modifier)) == IdlModifier::Readonly;
        Some(Self { node, ident, ty, readonly })
    }

    pub fn type_name(&self) -> Option<Cow<'a, str>> {
        self.ty.name()
    }
}
