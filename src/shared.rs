//! Storage classification of a property from binding-specification
//! `BINDING_PROPERTY` overrides.
use crate::genbind::{GenbindKind, GenbindNode, SharedModifier};
use crate::query;

/// Classification of one attribute plus the override that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Storage<'a> {
    pub modifier: SharedModifier,
    /// IDENT of the matching `BINDING_PROPERTY`; names the type handler
    /// pair when the type-handler bit is set.
    pub key: Option<&'a str>,
}

impl<'a> Storage<'a> {
    /// Accessor slot for the table: the override key for type handlers,
    /// else the attribute's own identifier.
    pub fn slot(&self, ident: &'a str) -> &'a str {
        match self.key {
            Some(key) if self.modifier.is_type_handler() => key,
            _ => ident,
        }
    }
}

/// Classification for an attribute `ident` of declared type `type_name`.
///
/// An override keyed by the identifier is authoritative when it carries a
/// `MODIFIER`; otherwise an override keyed by the type name is consulted.
/// Without either, storage is engine-managed and shared.
pub fn classify<'a>(binding_list: &'a [GenbindNode], ident: &str, type_name: Option<&str>) -> Storage<'a> {
    let by_ident = keyed_modifier(binding_list, ident);
    let by_type = || type_name.and_then(|ty| keyed_modifier(binding_list, ty));
    match by_ident.or_else(by_type) {
        Some((key, modifier)) => Storage { modifier, key: Some(key) },
        None => Storage::default(),
    }
}

pub fn shared_modifier(binding_list: &[GenbindNode], ident: &str, type_name: Option<&str>) -> SharedModifier {
    classify(binding_list, ident, type_name).modifier
}

fn keyed_modifier<'a>(binding_list: &'a [GenbindNode], key: &str) -> Option<(&'a str, SharedModifier)> {
    let property = query::find_first_ident(binding_list, GenbindKind::BindingProperty, key)?;
    let modifier = query::find_first(&property.children, GenbindKind::Modifier).map(SharedModifier::from_node)?;
    Some((property.ident()?, modifier))
}

/// `BINDING_PROPERTY` overrides that delegate to a whole-type handler.
pub fn type_handlers(binding_list: &[GenbindNode]) -> impl Iterator<Item = (&str, SharedModifier)> {
    query::iter_kind(binding_list, GenbindKind::BindingProperty).filter_map(|property| {
        let modifier = query::find_first(&property.children, GenbindKind::Modifier).map(SharedModifier::from_node)?;
        if !modifier.is_type_handler() {
            return None;
        }
        Some((property.ident()?, modifier))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::gb;

    #[test]
    fn identifier_override_wins_over_type_override() {
        let list = vec![
            gb::property("DOMString", Some(SharedModifier::UNSHARED)),
            gb::property("title", Some(SharedModifier::TYPE_HANDLER)),
        ];
        assert_eq!(shared_modifier(&list, "title", Some("DOMString")), SharedModifier::TYPE_HANDLER);
        assert_eq!(shared_modifier(&list, "lang", Some("DOMString")), SharedModifier::UNSHARED);
    }

    #[test]
    fn classification_reports_the_deciding_key() {
        let list = vec![
            gb::property("DOMString", Some(SharedModifier::TYPE_HANDLER)),
            gb::property("title", Some(SharedModifier::TYPE_HANDLER_UNSHARED)),
            gb::property("lang", Some(SharedModifier::UNSHARED)),
        ];
        let title = classify(&list, "title", Some("DOMString"));
        assert_eq!(title.key, Some("title"));
        assert_eq!(title.slot("title"), "title");

        let dir = classify(&list, "dir", Some("DOMString"));
        assert_eq!(dir.key, Some("DOMString"));
        assert_eq!(dir.slot("dir"), "DOMString");

        // without the type-handler bit the attribute keeps its own accessors
        assert_eq!(classify(&list, "lang", Some("DOMString")).slot("lang"), "lang");
        assert_eq!(classify(&list, "x", None), Storage::default());
    }

    #[test]
    fn identifier_override_without_modifier_falls_through_to_type() {
        let list = vec![
            gb::property("title", None),
            gb::property("DOMString", Some(SharedModifier::TYPE_HANDLER_UNSHARED)),
        ];
        assert_eq!(shared_modifier(&list, "title", Some("DOMString")), SharedModifier::TYPE_HANDLER_UNSHARED);
    }

    #[test]
    fn defaults_to_shared_without_overrides() {
        let list = vec![gb::property("Node", Some(SharedModifier::UNSHARED))];
        let classification = shared_modifier(&list, "count", Some("long"));
        assert_eq!(classification, SharedModifier::empty());
        assert!(classification.is_shared());
        assert_eq!(shared_modifier(&list, "count", None), SharedModifier::empty());
    }

    #[test]
    fn type_handlers_only_lists_type_bit_overrides() {
        let list = vec![
            gb::property("DOMString", Some(SharedModifier::UNSHARED)),
            gb::property("Node", Some(SharedModifier::TYPE_HANDLER)),
            gb::property("plain", None),
            gb::property("Element", Some(SharedModifier::TYPE_HANDLER_UNSHARED)),
        ];
        let names: Vec<_> = type_handlers(&list).map(|(name, _)| name).collect();
        assert_eq!(names, ["Node", "Element"]);
    }
}
