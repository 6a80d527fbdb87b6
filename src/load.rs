//! Loading of already-parsed syntax trees.
//!
//! Trees arrive as JSON arrays of nodes. Decode failures report the JSON
//! path of the offending value.
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::ast::{Node, NodeKind};
use crate::error::ParseError;
use crate::genbind::{GenbindKind, GenbindNode};
use crate::query;
use crate::webidl::WebidlNode;

/// Source of the two syntax trees consumed by generation.
pub trait AstLoader {
    fn parse_binding_spec(&self, path: &Path) -> Result<Vec<GenbindNode>, ParseError>;

    /// Parse one WebIDL file, named as written in a `WEBIDLFILE` entry.
    fn parse_webidl(&self, name: &str) -> Result<Vec<WebidlNode>, ParseError>;
}

/// Reads JSON serialised trees from disk.
#[derive(Debug, Clone, Default)]
pub struct JsonAstLoader {
    pub search_path: Vec<PathBuf>,
}

impl JsonAstLoader {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self { search_path }
    }
}

impl AstLoader for JsonAstLoader {
    fn parse_binding_spec(&self, path: &Path) -> Result<Vec<GenbindNode>, ParseError> {
        read_tree(path)
    }

    fn parse_webidl(&self, name: &str) -> Result<Vec<WebidlNode>, ParseError> {
        let path = locate(name, &self.search_path).ok_or_else(|| ParseError::NotFound { name: name.to_string() })?;
        read_tree(&path)
    }
}

/// Resolve `name` against the search path; names that already exist as
/// given win over search-path entries.
pub fn locate(name: &str, search_path: &[PathBuf]) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_file() {
        return Some(direct.to_path_buf());
    }
    if direct.is_absolute() {
        return None;
    }
    search_path.iter().map(|dir| dir.join(name)).find(|candidate| candidate.is_file())
}

/// Load and concatenate every `WEBIDLFILE` named by the binding tree, in
/// declaration order.
pub fn load_webidl(loader: &dyn AstLoader, genbind: &[GenbindNode]) -> Result<Vec<WebidlNode>, ParseError> {
    let mut webidl = Vec::new();
    for file in query::iter_kind(genbind, GenbindKind::Webidlfile) {
        let Some(name) = file.text().or_else(|| file.ident()) else {
            continue;
        };
        let mut tree = loader.parse_webidl(name)?;
        tracing::debug!(file = name, interfaces = tree.len(), "loaded WebIDL");
        webidl.append(&mut tree);
    }
    Ok(webidl)
}

fn read_tree<K>(path: &Path) -> Result<Vec<Node<K>>, ParseError>
where
    K: NodeKind + DeserializeOwned,
{
    let bytes = fs::read(path).map_err(|source| ParseError::Io { path: path.to_path_buf(), source })?;
    from_slice_with_path(&bytes).map_err(|message| ParseError::Syntax { path: path.to_path_buf(), message })
}

/// Deserialize with JSON-path context in error messages.
fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
