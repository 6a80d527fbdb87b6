//! Property table and property accessor generation.
//!
//! Both passes share the resolution walk of [`crate::resolve`]: own
//! fragments, then the inherited interface, then implemented interfaces.
//! The table pass emits one `JSAPI_PS` entry per attribute; the body pass
//! emits setter/getter functions per attribute and finally one accessor
//! pair per whole-type handler.
use std::io::Write;

use indexmap::IndexSet;

use super::binding::Binding;
use super::c_ident;
use super::output::OutputSink;
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::GenError;
use crate::genbind::{self, GenbindKind, GenbindNode};
use crate::query;
use crate::resolve;
use crate::shared::{self, Storage};
use crate::typemap::{self, Mapping};
use crate::webidl::{Attribute, WebidlKind, WebidlNode};

/// Name of the local holding a getter's return value.
const RETURN_LOCAL: &str = "jsret";

/// Emit the `jsclass_properties` table for the binding's interface.
pub fn output_property_spec<W: Write>(
    binding: &Binding<'_>,
    out: &mut OutputSink<W>,
    diag: &mut dyn Diagnostics,
) -> Result<(), GenError> {
    PropertyGen { binding, out, diag }.property_spec()
}

/// Emit accessor bodies for every attribute, then the type handlers.
pub fn output_property_body<W: Write>(
    binding: &Binding<'_>,
    out: &mut OutputSink<W>,
    diag: &mut dyn Diagnostics,
) -> Result<(), GenError> {
    let mut cg = PropertyGen { binding, out, diag };
    cg.property_bodies()?;
    cg.type_handlers()
}

struct PropertyGen<'b, 'a, W: Write> {
    binding: &'b Binding<'a>,
    out: &'b mut OutputSink<W>,
    diag: &'b mut dyn Diagnostics,
}

impl<'b, 'a, W: Write> PropertyGen<'b, 'a, W> {
    // ------------------------------ Table ------------------------------- //

    fn property_spec(&mut self) -> Result<(), GenError> {
        self.require_interface()?;
        writeln!(self.out, "static JSPropertySpec jsclass_properties[] = {{")?;

        let (webidl, top) = (self.binding.webidl, self.binding.interface);
        resolve::walk_interface(webidl, top, &mut |interface, list| {
            writeln!(self.out, "\t/**** {interface} ****/")?;
            query::for_each(&list.children, WebidlKind::Attribute, |node| self.property_spec_entry(interface, node))
        })?;

        writeln!(self.out, "\tJSAPI_PS_END\n}};\n")?;
        Ok(())
    }

    fn property_spec_entry(&mut self, interface: &str, node: &'a WebidlNode) -> Result<(), GenError> {
        let attr = attribute(interface, node)?;
        let storage = self.classify(&attr);

        let entry = if attr.readonly { "JSAPI_PS_RO" } else { "JSAPI_PS" };
        let flags = if storage.modifier.is_shared() {
            // js provides no storage; accessors perform all GC management
            "JSPROP_ENUMERATE | JSPROP_SHARED"
        } else {
            "JSPROP_ENUMERATE"
        };
        let slot = c_ident(storage.slot(attr.ident));
        writeln!(self.out, "\t{entry}(\"{}\", {slot}, 0, {flags}),", attr.ident)?;
        Ok(())
    }

    // ------------------------------ Bodies ------------------------------ //

    fn property_bodies(&mut self) -> Result<(), GenError> {
        self.require_interface()?;

        let (webidl, top) = (self.binding.webidl, self.binding.interface);
        resolve::walk_interface(webidl, top, &mut |interface, list| {
            writeln!(self.out, "/**** {interface} ****/")?;
            query::for_each(&list.children, WebidlKind::Attribute, |node| self.property_body(interface, node))
        })
    }

    fn property_body(&mut self, interface: &str, node: &'a WebidlNode) -> Result<(), GenError> {
        let attr = attribute(interface, node)?;
        let storage = self.classify(&attr);

        // the type handler pair named by the override stands in for this attribute
        if storage.modifier.is_type_handler() {
            tracing::debug!(interface, attribute = attr.ident, "delegated to type handler");
            return Ok(());
        }
        if !attr.readonly {
            self.property_setter(attr.ident)?;
        }
        self.property_getter(interface, &attr)
    }

    fn property_setter(&mut self, ident: &str) -> Result<(), GenError> {
        writeln!(self.out, "static JSBool JSAPI_PROP_SETTER({ident}, JSContext *cx, JSObject *obj, jsval *vp)\n{{")?;
        match self.code_node(GenbindKind::Setter, ident) {
            Some(setter) => {
                self.private_prologue()?;
                self.code_block(setter)?;
                writeln!(self.out, "\treturn JS_TRUE;\n}}\n")?;
            }
            // unimplemented setters fail loudly
            None => writeln!(self.out, "\treturn JS_FALSE;\n}}\n")?,
        }
        Ok(())
    }

    fn property_getter(&mut self, interface: &str, attr: &Attribute<'a>) -> Result<(), GenError> {
        let ident = attr.ident;
        writeln!(self.out, "static JSBool JSAPI_PROP_GETTER({ident}, JSContext *cx, JSObject *obj, jsval *vp)\n{{")?;

        let mapping = typemap::lookup_type(&attr.ty);
        match mapping {
            Mapping::Value(native) => writeln!(self.out, "{}", native.declaration(RETURN_LOCAL, attr.ty.user_name))?,
            Mapping::Void => {}
            Mapping::Unsupported(what) => {
                self.diag.warn(WarningKind::Unimplemented, format!("Unhandled type {what} for {interface}.{ident}"));
            }
        }

        self.private_prologue()?;

        if let Some(getter) = self.code_node(GenbindKind::Getter, ident) {
            self.code_block(getter)?;
        } else if self.binding.block.internal_field(ident).is_some() && matches!(mapping, Mapping::Value(_)) {
            // internal fields are read without checking the WebIDL type
            writeln!(self.out, "\t{RETURN_LOCAL} = private->{ident};")?;
        } else {
            self.placeholder(&format!("{interface}.{ident}"))?;
        }

        if let Mapping::Value(native) = mapping {
            writeln!(self.out, "{}", native.return_conversion(RETURN_LOCAL))?;
        }
        writeln!(self.out, "\treturn JS_TRUE;\n}}\n")?;
        Ok(())
    }

    // --------------------------- Type handlers -------------------------- //

    fn type_handlers(&mut self) -> Result<(), GenError> {
        let handlers: IndexSet<&str> = shared::type_handlers(self.binding.block.members())
            .map(|(type_name, _)| type_name)
            .collect();
        for type_name in handlers {
            self.type_setter(type_name)?;
            self.type_getter(type_name)?;
        }
        Ok(())
    }

    fn type_setter(&mut self, type_name: &str) -> Result<(), GenError> {
        let slot = c_ident(type_name);
        writeln!(self.out, "static JSBool JSAPI_PROP_SETTER({slot}, JSContext *cx, JSObject *obj, jsval *vp)\n{{")?;
        match self.code_node(GenbindKind::Setter, type_name) {
            Some(setter) => {
                self.private_prologue()?;
                self.code_block(setter)?;
                writeln!(self.out, "\treturn JS_TRUE;\n}}\n")?;
            }
            None => writeln!(self.out, "\treturn JS_FALSE;\n}}\n")?,
        }
        Ok(())
    }

    /// Type getters declare no `jsret`; a `GETTER` block sets the return
    /// value itself and internal fields are never read here.
    fn type_getter(&mut self, type_name: &str) -> Result<(), GenError> {
        let slot = c_ident(type_name);
        writeln!(self.out, "static JSBool JSAPI_PROP_GETTER({slot}, JSContext *cx, JSObject *obj, jsval *vp)\n{{")?;
        self.private_prologue()?;
        match self.code_node(GenbindKind::Getter, type_name) {
            Some(getter) => self.code_block(getter)?,
            None => self.placeholder(&format!("type {type_name}"))?,
        }
        writeln!(self.out, "\treturn JS_TRUE;\n}}\n")?;
        Ok(())
    }

    // ------------------------------ Helpers ----------------------------- //

    fn require_interface(&self) -> Result<(), GenError> {
        if resolve::declarations(self.binding.webidl, self.binding.interface).is_empty() {
            return Err(GenError::UnknownInterface(self.binding.interface.to_string()));
        }
        Ok(())
    }

    fn classify(&self, attr: &Attribute<'_>) -> Storage<'a> {
        let type_name = attr.type_name();
        shared::classify(self.binding.block.members(), attr.ident, type_name.as_deref())
    }

    fn code_node(&self, kind: GenbindKind, key: &str) -> Option<&'a GenbindNode> {
        query::find_first_ident(self.binding.genbind, kind, key)
    }

    fn code_block(&mut self, node: &GenbindNode) -> Result<(), GenError> {
        for code in genbind::code_blocks(node) {
            self.out.write_str(code)?;
            if !code.ends_with('\n') {
                self.out.write_str("\n")?;
            }
        }
        Ok(())
    }

    /// Fetch the per-object private record; objects without one are foreign
    /// to this class and the accessor fails.
    fn private_prologue(&mut self) -> Result<(), GenError> {
        if !self.binding.has_private {
            return Ok(());
        }
        write!(
            self.out,
            "\tstruct jsclass_private *private;\n\
             \n\
             \tprivate = JS_GetInstancePrivate(cx,\n\
             \t\tobj,\n\
             \t\t&JSClass_{},\n\
             \t\tNULL);\n\
             \tif (private == NULL)\n\
             \t\treturn JS_FALSE;\n\n",
            self.binding.interface
        )?;
        Ok(())
    }

    fn placeholder(&mut self, what: &str) -> Result<(), GenError> {
        self.diag.warn(WarningKind::Unimplemented, format!("property {what} has no implementation"));
        writeln!(self.out, "\tJSLOG(\"property {what} has no implementation\");")?;
        Ok(())
    }
}

fn attribute<'a>(interface: &str, node: &'a WebidlNode) -> Result<Attribute<'a>, GenError> {
    Attribute::from_node(node).ok_or_else(|| GenError::AnonymousAttribute { interface: interface.to_string() })
}
