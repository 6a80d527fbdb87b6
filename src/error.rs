//! Error taxonomy. Every fatal kind carries the process status it maps to.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Bad command-line usage; raised before any input is read.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0}")]
    Usage(String),

    #[error("output to stdout with verbose logging would fail")]
    VerboseToStdout,
}

impl ConfigError {
    pub fn status(&self) -> u8 {
        match self {
            ConfigError::Usage(_) => 1,
            ConfigError::VerboseToStdout => 2,
        }
    }
}

/// Failure of a parser collaborator.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed AST in {} {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    #[error("unable to locate WebIDL file {name} on the search path")]
    NotFound { name: String },
}

impl ParseError {
    pub fn status(&self) -> u8 {
        match self {
            ParseError::Io { .. } | ParseError::NotFound { .. } => 3,
            ParseError::Syntax { .. } => 5,
        }
    }
}

/// Fatal generation failure. The first one aborts the run.
#[derive(Error, Debug)]
pub enum GenError {
    #[error("unable to find interface {0} in loaded WebIDL")]
    UnknownInterface(String),

    #[error("interface {interface} inherits or implements an unnamed interface")]
    UnnamedReference { interface: String },

    #[error("cyclic inheritance: {}", chain.join(" -> "))]
    CyclicInheritance { chain: Vec<String> },

    #[error("attribute without identifier in interface {interface}")]
    AnonymousAttribute { interface: String },

    #[error("binding specification does not name an interface")]
    MissingInterface,

    #[error("output error: {0}")]
    Sink(#[from] io::Error),
}

impl GenError {
    pub fn status(&self) -> u8 {
        match self {
            GenError::Sink(_) => 4,
            GenError::UnknownInterface(_) | GenError::UnnamedReference { .. } => 6,
            GenError::CyclicInheritance { .. } => 7,
            GenError::AnonymousAttribute { .. } => 8,
            GenError::MissingInterface => 9,
        }
    }
}
