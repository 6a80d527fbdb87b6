//! Generator of engine property bindings from a binding specification tree
//! and the WebIDL trees it names.
pub mod ast;
pub mod cli;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod genbind;
pub mod load;
pub mod logging;
pub mod query;
pub mod resolve;
pub mod shared;
pub mod typemap;
pub mod webidl;

#[cfg(test)]
mod fixtures;
