//! Top-level emission for one binding specification.
use std::io::Write;

use super::output::OutputSink;
use super::property::{output_property_body, output_property_spec};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::GenError;
use crate::genbind::{self, BindingBlock, GenbindKind, GenbindNode};
use crate::query;
use crate::webidl::WebidlNode;

/// Immutable generation context shared by every pass.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    /// Top-level interface the binding implements.
    pub interface: &'a str,
    pub genbind: &'a [GenbindNode],
    pub block: BindingBlock<'a>,
    pub webidl: &'a [WebidlNode],
    pub has_private: bool,
}

impl<'a> Binding<'a> {
    pub fn new(interface: &'a str, genbind: &'a [GenbindNode], block: BindingBlock<'a>, webidl: &'a [WebidlNode]) -> Self {
        Self { interface, genbind, block, webidl, has_private: block.has_private_storage() }
    }

    /// Locate the `BINDING` block and its interface.
    pub fn from_trees(
        genbind: &'a [GenbindNode],
        webidl: &'a [WebidlNode],
        diag: &mut dyn Diagnostics,
    ) -> Result<Self, GenError> {
        let block = BindingBlock::find(genbind).ok_or(GenError::MissingInterface)?;
        let mut interfaces = block.interfaces();
        let interface = interfaces.next().ok_or(GenError::MissingInterface)?;
        for extra in interfaces {
            diag.warn(WarningKind::Binding, format!("ignoring additional binding interface {extra}"));
        }
        Ok(Self::new(interface, genbind, block, webidl))
    }
}

/// Generate the complete output for a binding specification.
pub fn output_binding<W: Write>(
    genbind: &[GenbindNode],
    webidl: &[WebidlNode],
    out: &mut OutputSink<W>,
    diag: &mut dyn Diagnostics,
) -> Result<(), GenError> {
    for comment in query::iter_kind(genbind, GenbindKind::Hdrcomment) {
        out.header_comment(&header_text(comment), diag);
    }

    let binding = Binding::from_trees(genbind, webidl, diag)?;
    tracing::debug!(
        interface = binding.interface,
        binding_type = binding.block.binding_type().unwrap_or("unspecified"),
        "generating binding"
    );

    for preamble in query::iter_kind(genbind, GenbindKind::Preamble) {
        for code in genbind::code_blocks(preamble) {
            out.write_str(code)?;
            if !code.ends_with('\n') {
                out.write_str("\n")?;
            }
        }
    }

    if binding.has_private {
        output_private_struct(&binding, out)?;
    }

    out.begin_interface(binding.interface)?;
    output_property_spec(&binding, out, diag)?;
    output_property_body(&binding, out, diag)
}

fn header_text(comment: &GenbindNode) -> String {
    let mut lines: Vec<&str> = comment.text().into_iter().collect();
    lines.extend(query::iter_kind(&comment.children, GenbindKind::String).filter_map(|s| s.text()));
    lines.join("\n")
}

fn output_private_struct<W: Write>(binding: &Binding<'_>, out: &mut OutputSink<W>) -> Result<(), GenError> {
    writeln!(out, "struct jsclass_private {{")?;
    for field in binding.block.private_fields().chain(binding.block.internal_fields()) {
        let sep = if field.c_type.ends_with('*') { "" } else { " " };
        writeln!(out, "\t{}{sep}{};", field.c_type, field.ident)?;
    }
    writeln!(out, "}};\n")?;
    Ok(())
}
