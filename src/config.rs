//! Run configuration, built once by the entry point and passed down.
use std::path::PathBuf;

use clap::ValueEnum;

use crate::diagnostics::WarningKind;
use crate::error::ConfigError;

#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Binding specification tree.
    pub input: PathBuf,
    /// Generated code destination; standard output when `None`.
    pub output: Option<PathBuf>,
    /// Directories searched for `WEBIDLFILE` entries.
    pub search_path: Vec<PathBuf>,
    /// Dump both syntax trees to standard output before generating.
    pub verbose: bool,
    pub debug: bool,
    /// Reported warning categories; empty reports all of them.
    pub warnings: Vec<WarningKind>,
}

impl Options {
    /// Reject combinations that cannot work before any input is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.verbose && self.output.is_none() {
            return Err(ConfigError::VerboseToStdout);
        }
        Ok(())
    }

    pub fn enabled_warnings(&self) -> Vec<WarningKind> {
        if self.warnings.is_empty() {
            return WarningKind::value_variants().to_vec();
        }
        self.warnings.clone()
    }
}
