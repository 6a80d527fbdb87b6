//! Generic homogeneous AST node shared by the binding-specification tree and
//! the WebIDL tree.
//!
//! A node is a type tag plus optional text, optional integer and an ordered
//! child list. Each tree is owned by its root slice; children are owned by
//! their parent. Sibling order is positional (the index inside the parent's
//! child slice), there are no back or sibling pointers.
use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Closed set of tags for one tree vocabulary.
pub trait NodeKind: Copy + Eq + fmt::Debug {
    /// Tag of the identifier node used by identifier-keyed lookups.
    const IDENT: Self;

    /// Spelling used by the interchange format and the AST dump.
    fn as_str(self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>", serialize = "K: Serialize"))]
#[serde(deny_unknown_fields)]
pub struct Node<K> {
    pub kind: K,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, rename = "int", skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node<K>>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl<K: NodeKind> Node<K> {
    pub fn new(kind: K) -> Self {
        Self { kind, text: None, int_value: None, children: Vec::new() }
    }
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
    pub fn with_int(mut self, value: i64) -> Self {
        self.int_value = Some(value);
        self
    }
    pub fn with_child(mut self, child: Node<K>) -> Self {
        self.children.push(child);
        self
    }
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node<K>>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn kind(&self) -> K { self.kind }
    pub fn text(&self) -> Option<&str> { self.text.as_deref() }
    pub fn int(&self) -> Option<i64> { self.int_value }
    pub fn children(&self) -> &[Node<K>] { &self.children }

    /// Text of the first `IDENT` child, if any.
    pub fn ident(&self) -> Option<&str> {
        crate::query::find_first(&self.children, K::IDENT).and_then(Node::text)
    }
}

/// Indented, one-node-per-line rendering used by verbose mode.
pub fn dump<K: NodeKind>(roots: &[Node<K>]) -> String {
    fn go<K: NodeKind>(out: &mut String, node: &Node<K>, depth: usize) {
        let _ = write!(out, "{:indent$}{}", "", node.kind.as_str(), indent = depth * 2);
        if let Some(text) = &node.text {
            let _ = write!(out, " {text:?}");
        }
        if let Some(int) = node.int_value {
            let _ = write!(out, " {int}");
        }
        out.push('\n');
        for child in &node.children {
            go(out, child, depth + 1);
        }
    }
    let mut out = String::new();
    for root in roots {
        go(&mut out, root, 0);
    }
    out
}
