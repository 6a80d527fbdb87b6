//! Read-only traversal primitives over a node's children.
//!
//! All lookups are linear scans; trees hold tens of members per interface so
//! lookups cost O(members × overrides) overall.
use crate::ast::{Node, NodeKind};

/// First child with the given tag.
pub fn find_first<K: NodeKind>(children: &[Node<K>], kind: K) -> Option<&Node<K>> {
    children.iter().find(|node| node.kind == kind)
}

/// First child with the given tag that owns an `IDENT` whose text is `ident`.
pub fn find_first_ident<'a, K: NodeKind>(
    children: &'a [Node<K>],
    kind: K,
    ident: &str,
) -> Option<&'a Node<K>> {
    iter_kind(children, kind).find(|node| {
        iter_kind(&node.children, K::IDENT).any(|id| id.text() == Some(ident))
    })
}

/// Next child with the given tag positioned after `after`.
///
/// `None` starts from the beginning. A node that is not a member of
/// `children` yields `None`.
pub fn find_next<'a, K: NodeKind>(
    children: &'a [Node<K>],
    kind: K,
    after: Option<&Node<K>>,
) -> Option<&'a Node<K>> {
    let start = match after {
        None => 0,
        Some(prev) => children.iter().position(|node| std::ptr::eq(node, prev))? + 1,
    };
    find_first(&children[start..], kind)
}

/// Lazy iterator over every child with the given tag, in list order.
pub fn iter_kind<K: NodeKind>(children: &[Node<K>], kind: K) -> impl Iterator<Item = &Node<K>> {
    children.iter().filter(move |node| node.kind == kind)
}

/// Apply `visit` to every child with the given tag; the first error aborts.
pub fn for_each<'a, K, E, F>(children: &'a [Node<K>], kind: K, visit: F) -> Result<(), E>
where
    K: NodeKind,
    F: FnMut(&'a Node<K>) -> Result<(), E>,
{
    iter_kind(children, kind).try_for_each(visit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::webidl::WebidlKind;

    fn list(attrs: &[&str]) -> Node<WebidlKind> {
        Node::new(WebidlKind::List).with_children(attrs.iter().map(|name| {
            Node::new(WebidlKind::Attribute)
                .with_child(Node::new(WebidlKind::Ident).with_text(*name))
        }))
    }

    #[test]
    fn find_first_ident_matches_ident_child_text() {
        let fragment = list(&["width", "height"]);
        let found = find_first_ident(&fragment.children, WebidlKind::Attribute, "height");
        assert!(std::ptr::eq(found.unwrap(), &fragment.children[1]));
        assert!(find_first_ident(&fragment.children, WebidlKind::Attribute, "depth").is_none());
    }

    #[test]
    fn find_next_walks_same_kind_siblings() {
        let iface = Node::new(WebidlKind::Interface).with_text("Doc").with_children([
            list(&["a"]),
            Node::new(WebidlKind::InterfaceInheritance).with_text("Node"),
            list(&["b"]),
        ]);
        let first = find_next(&iface.children, WebidlKind::List, None).unwrap();
        let second = find_next(&iface.children, WebidlKind::List, Some(first)).unwrap();
        assert_eq!(second.children[0].ident(), Some("b"));
        assert!(find_next(&iface.children, WebidlKind::List, Some(second)).is_none());
    }

    #[test]
    fn find_next_rejects_foreign_anchor() {
        let a = list(&["x"]);
        let stranger = list(&["x"]);
        assert!(find_next(&a.children, WebidlKind::Attribute, Some(&stranger.children[0])).is_none());
    }

    #[test]
    fn for_each_stops_at_first_error() {
        let fragment = list(&["one", "two", "three"]);
        let mut seen = Vec::new();
        let res = for_each(&fragment.children, WebidlKind::Attribute, |node| {
            let name = node.ident().unwrap_or_default();
            seen.push(name);
            if name == "two" { Err(name) } else { Ok(()) }
        });
        assert_eq!(res, Err("two"));
        assert_eq!(seen, ["one", "two"]);
    }
}
