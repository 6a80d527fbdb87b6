//! Interface resolution: partial fragments, single inheritance and mixins
//! expanded into one ordered member walk.
//!
//! Order is stable: every `LIST` fragment of the interface in document
//! order, then the inherited interface (recursively), then each implemented
//! interface (recursively). An interface re-entered while it is still being
//! expanded is a cycle and is rejected. Reaching an already expanded
//! interface through a second path is not a cycle; its members are visited
//! only the first time.
use std::collections::HashSet;

use crate::error::GenError;
use crate::query;
use crate::webidl::{Attribute, WebidlKind, WebidlNode};

/// Name an `INTERFACE` node is declared under.
pub fn interface_name(node: &WebidlNode) -> Option<&str> {
    node.text().or_else(|| node.ident())
}

/// Every declaration (partial fragments included) of `name`, in order.
pub fn declarations<'a>(webidl: &'a [WebidlNode], name: &str) -> Vec<&'a WebidlNode> {
    query::iter_kind(webidl, WebidlKind::Interface)
        .filter(|node| interface_name(node) == Some(name))
        .collect()
}

/// Walk the fragments of `name` and everything it inherits or implements.
///
/// `visit` receives the declaring interface name and one `LIST` fragment. The
/// first error (unknown interface, cycle, or one returned by `visit`) aborts
/// the walk and is returned unchanged.
pub fn walk_interface<'a, F>(webidl: &'a [WebidlNode], name: &str, visit: &mut F) -> Result<(), GenError>
where
    F: FnMut(&'a str, &'a WebidlNode) -> Result<(), GenError>,
{
    walk(webidl, name, &mut WalkState::default(), visit)
}

#[derive(Default)]
struct WalkState {
    /// Interfaces currently being expanded, outermost first.
    chain: Vec<String>,
    expanded: HashSet<String>,
}

fn walk<'a, F>(
    webidl: &'a [WebidlNode],
    name: &str,
    state: &mut WalkState,
    visit: &mut F,
) -> Result<(), GenError>
where
    F: FnMut(&'a str, &'a WebidlNode) -> Result<(), GenError>,
{
    if state.chain.iter().any(|active| active == name) {
        let mut cycle = state.chain.clone();
        cycle.push(name.to_string());
        return Err(GenError::CyclicInheritance { chain: cycle });
    }
    if state.expanded.contains(name) {
        tracing::debug!(interface = name, "already expanded");
        return Ok(());
    }

    let decls = declarations(webidl, name);
    let Some(&first) = decls.first() else {
        return Err(GenError::UnknownInterface(name.to_string()));
    };
    let declared_as = interface_name(first).unwrap_or_default();
    tracing::debug!(interface = declared_as, fragments = decls.len(), "resolving interface");

    state.chain.push(name.to_string());

    // own members first, across every partial declaration
    for &decl in &decls {
        let mut fragment = query::find_next(&decl.children, WebidlKind::List, None);
        while let Some(list) = fragment {
            visit(declared_as, list)?;
            fragment = query::find_next(&decl.children, WebidlKind::List, Some(list));
        }
    }

    let parent = decls
        .iter()
        .copied()
        .find_map(|decl| query::find_first(&decl.children, WebidlKind::InterfaceInheritance));
    if let Some(parent) = parent {
        walk(webidl, referenced_name(declared_as, parent)?, state, visit)?;
    }

    for &decl in &decls {
        query::for_each(&decl.children, WebidlKind::InterfaceImplements, |mixin| {
            walk(webidl, referenced_name(declared_as, mixin)?, state, visit)
        })?;
    }

    state.chain.pop();
    state.expanded.insert(name.to_string());
    Ok(())
}

/// Target of an inheritance or implements node; a reference without a
/// name cannot be resolved.
fn referenced_name<'a>(interface: &str, node: &'a WebidlNode) -> Result<&'a str, GenError> {
    interface_name(node)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GenError::UnnamedReference { interface: interface.to_string() })
}

/// Attribute reached by the walk, tagged with its declaring interface.
#[derive(Debug, Clone)]
pub struct ResolvedAttribute<'a> {
    pub interface: &'a str,
    pub attribute: Attribute<'a>,
}

/// Effective attribute list of `name` in walk order.
pub fn resolve_attributes<'a>(webidl: &'a [WebidlNode], name: &str) -> Result<Vec<ResolvedAttribute<'a>>, GenError> {
    let mut out = Vec::new();
    walk_interface(webidl, name, &mut |interface, list| {
        query::for_each(&list.children, WebidlKind::Attribute, |node| {
            let attribute = Attribute::from_node(node)
                .ok_or_else(|| GenError::AnonymousAttribute { interface: interface.to_string() })?;
            out.push(ResolvedAttribute { interface, attribute });
            Ok(())
        })
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::idl;
    use crate::webidl::TypeBase;

    fn names(webidl: &[WebidlNode], name: &str) -> Vec<String> {
        resolve_attributes(webidl, name)
            .unwrap()
            .into_iter()
            .map(|r| format!("{}.{}", r.interface, r.attribute.ident))
            .collect()
    }

    fn foo() -> WebidlNode {
        idl::interface("Foo", [idl::list(vec![idl::attr("count", TypeBase::Long, true)])])
    }

    #[test]
    fn derived_interface_without_members_yields_parent_members() {
        let webidl = vec![
            foo(),
            idl::interface("Bar", [idl::inherits("Foo"), idl::list(vec![])]),
        ];
        assert_eq!(names(&webidl, "Bar"), ["Foo.count"]);
    }

    #[test]
    fn fragments_in_order_then_parent_then_mixins() {
        let webidl = vec![
            idl::interface("Node", [idl::list(vec![idl::attr("nodeName", TypeBase::String, true)])]),
            idl::interface("ParentNode", [idl::list(vec![idl::attr("children", TypeBase::Object, true)])]),
            idl::interface("Element", [
                idl::list(vec![idl::attr("id", TypeBase::String, false)]),
                idl::implements("ParentNode"),
                idl::inherits("Node"),
                idl::list(vec![idl::attr("className", TypeBase::String, false), idl::attr("tagName", TypeBase::String, true)]),
            ]),
        ];
        assert_eq!(
            names(&webidl, "Element"),
            ["Element.id", "Element.className", "Element.tagName", "Node.nodeName", "ParentNode.children"]
        );
    }

    #[test]
    fn partial_declarations_merge_before_inheritance() {
        let webidl = vec![
            idl::interface("Window", [idl::inherits("EventTarget"), idl::list(vec![idl::attr("name", TypeBase::String, false)])]),
            idl::interface("EventTarget", [idl::list(vec![])]),
            idl::interface("Window", [idl::list(vec![idl::attr("closed", TypeBase::Bool, true)])]),
        ];
        assert_eq!(names(&webidl, "Window"), ["Window.name", "Window.closed"]);
    }

    #[test]
    fn unknown_interface_is_reported_before_any_visit() {
        let webidl = vec![idl::interface("Bar", [idl::list(vec![idl::attr("x", TypeBase::Long, true)]), idl::inherits("Missing")])];
        let mut visited = 0;
        let err = walk_interface(&webidl, "Nope", &mut |_, _| {
            visited += 1;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, GenError::UnknownInterface(ref n) if n == "Nope"));
        assert_eq!(visited, 0);

        let err = resolve_attributes(&webidl, "Bar").unwrap_err();
        assert!(matches!(err, GenError::UnknownInterface(ref n) if n == "Missing"));
    }

    #[test]
    fn inheritance_cycle_is_rejected() {
        let webidl = vec![
            idl::interface("A", [idl::list(vec![]), idl::inherits("B")]),
            idl::interface("B", [idl::list(vec![]), idl::implements("A")]),
        ];
        let err = resolve_attributes(&webidl, "A").unwrap_err();
        match err {
            GenError::CyclicInheritance { chain } => assert_eq!(chain, ["A", "B", "A"]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn diamond_visits_shared_interface_once() {
        let webidl = vec![
            idl::interface("Mixin", [idl::list(vec![idl::attr("m", TypeBase::Bool, true)])]),
            idl::interface("Base", [idl::list(vec![]), idl::implements("Mixin")]),
            idl::interface("Leaf", [idl::list(vec![]), idl::inherits("Base"), idl::implements("Mixin")]),
        ];
        assert_eq!(names(&webidl, "Leaf"), ["Mixin.m"]);
    }

    #[test]
    fn nameless_parent_or_mixin_is_fatal() {
        let parent = vec![idl::interface(
            "X",
            [idl::list(vec![]), WebidlNode::new(WebidlKind::InterfaceInheritance)],
        )];
        assert!(matches!(
            resolve_attributes(&parent, "X"),
            Err(GenError::UnnamedReference { ref interface }) if interface == "X"
        ));

        let mixin = vec![idl::interface(
            "X",
            [idl::list(vec![]), WebidlNode::new(WebidlKind::InterfaceImplements).with_text("")],
        )];
        assert!(matches!(resolve_attributes(&mixin, "X"), Err(GenError::UnnamedReference { .. })));
    }

    #[test]
    fn anonymous_attribute_aborts() {
        let webidl = vec![idl::interface(
            "Broken",
            [idl::list(vec![WebidlNode::new(WebidlKind::Attribute)])],
        )];
        assert!(matches!(
            resolve_attributes(&webidl, "Broken"),
            Err(GenError::AnonymousAttribute { .. })
        ));
    }
}
