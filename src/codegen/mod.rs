//! Generation of engine binding code for WebIDL properties.
pub mod binding;
pub mod output;
pub mod property;

pub use binding::{output_binding, Binding};
pub use output::OutputSink;
pub use property::{output_property_body, output_property_spec};

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());

/// Spell `name` as a C identifier (`unsigned long` → `unsigned_long`).
pub fn c_ident(name: &str) -> Cow<'_, str> {
    let replaced = NON_IDENT.replace_all(name, "_");
    if replaced.starts_with(|c: char| c.is_ascii_digit()) {
        Cow::Owned(format!("_{replaced}"))
    } else {
        replaced
    }
}
