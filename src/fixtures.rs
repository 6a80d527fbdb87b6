//! Tree builders shared by the unit tests.

pub mod idl {
    use crate::webidl::{IdlModifier, TypeBase, WebidlKind, WebidlNode};

    fn ident(name: &str) -> WebidlNode {
        WebidlNode::new(WebidlKind::Ident).with_text(name)
    }

    fn modifier(value: IdlModifier) -> WebidlNode {
        WebidlNode::new(WebidlKind::Modifier).with_int(value as i64)
    }

    pub fn type_node(base: TypeBase, unsigned: bool, user: Option<&str>) -> WebidlNode {
        let mut node = WebidlNode::new(WebidlKind::Type)
            .with_child(WebidlNode::new(WebidlKind::TypeBase).with_int(base.as_int()));
        if unsigned {
            node = node.with_child(modifier(IdlModifier::Unsigned));
        }
        if let Some(user) = user {
            node = node.with_child(ident(user));
        }
        node
    }

    fn attribute(name: &str, ty: WebidlNode, readonly: bool) -> WebidlNode {
        let mut node = WebidlNode::new(WebidlKind::Attribute).with_child(ident(name)).with_child(ty);
        if readonly {
            node = node.with_child(modifier(IdlModifier::Readonly));
        }
        node
    }

    pub fn attr(name: &str, base: TypeBase, readonly: bool) -> WebidlNode {
        attribute(name, type_node(base, false, None), readonly)
    }

    pub fn attr_unsigned(name: &str, base: TypeBase, readonly: bool) -> WebidlNode {
        attribute(name, type_node(base, true, None), readonly)
    }

    pub fn attr_user(name: &str, user: &str, readonly: bool) -> WebidlNode {
        attribute(name, type_node(TypeBase::User, false, Some(user)), readonly)
    }

    pub fn list(members: Vec<WebidlNode>) -> WebidlNode {
        WebidlNode::new(WebidlKind::List).with_children(members)
    }

    /// Interface `name` with one `LIST` per fragment.
    pub fn interface(name: &str, fragments: impl IntoIterator<Item = WebidlNode>) -> WebidlNode {
        WebidlNode::new(WebidlKind::Interface).with_text(name).with_children(fragments)
    }

    pub fn inherits(name: &str) -> WebidlNode {
        WebidlNode::new(WebidlKind::InterfaceInheritance).with_text(name)
    }

    pub fn implements(name: &str) -> WebidlNode {
        WebidlNode::new(WebidlKind::InterfaceImplements).with_text(name)
    }
}

pub mod gb {
    use crate::genbind::{GenbindKind, GenbindNode, SharedModifier};

    fn ident(name: &str) -> GenbindNode {
        GenbindNode::new(GenbindKind::Ident).with_text(name)
    }

    pub fn modifier(value: SharedModifier) -> GenbindNode {
        GenbindNode::new(GenbindKind::Modifier).with_int(value.bits() as i64)
    }

    pub fn cblock(code: &str) -> GenbindNode {
        GenbindNode::new(GenbindKind::Cblock).with_text(code)
    }

    pub fn property(key: &str, shared: Option<SharedModifier>) -> GenbindNode {
        let mut node = GenbindNode::new(GenbindKind::BindingProperty);
        if let Some(shared) = shared {
            node = node.with_child(modifier(shared));
        }
        node.with_child(ident(key))
    }

    fn field(kind: GenbindKind, c_type: &str, name: &str) -> GenbindNode {
        GenbindNode::new(kind)
            .with_child(GenbindNode::new(GenbindKind::String).with_text(c_type))
            .with_child(ident(name))
    }

    pub fn private(c_type: &str, name: &str) -> GenbindNode {
        field(GenbindKind::BindingPrivate, c_type, name)
    }

    pub fn internal(c_type: &str, name: &str) -> GenbindNode {
        field(GenbindKind::BindingInternal, c_type, name)
    }

    pub fn binding(interface: &str, members: Vec<GenbindNode>) -> GenbindNode {
        GenbindNode::new(GenbindKind::Binding)
            .with_child(GenbindNode::new(GenbindKind::BindingType).with_text("jsapi_libdom"))
            .with_child(GenbindNode::new(GenbindKind::BindingInterface).with_child(ident(interface)))
            .with_children(members)
    }

    pub fn getter(key: &str, code: &str) -> GenbindNode {
        GenbindNode::new(GenbindKind::Getter).with_child(ident(key)).with_child(cblock(code))
    }

    pub fn setter(key: &str, code: &str) -> GenbindNode {
        GenbindNode::new(GenbindKind::Setter).with_child(ident(key)).with_child(cblock(code))
    }
}
