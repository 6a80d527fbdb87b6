//! Advisory warnings raised during generation.
//!
//! Warnings never change control flow. Every warning is recorded; only
//! categories enabled in the configuration are reported through `tracing`.
use std::fmt;

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum WarningKind {
    /// Unsupported type categories and members without an implementation.
    Unimplemented,
    /// Output bookkeeping, e.g. header text added after output began.
    Output,
    /// Binding specification oddities that are ignored.
    Binding,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningKind::Unimplemented => "unimplemented",
            WarningKind::Output => "output",
            WarningKind::Binding => "binding",
        })
    }
}

pub trait Diagnostics {
    fn warn(&mut self, kind: WarningKind, message: String);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Reporter {
    enabled: Vec<WarningKind>,
    warnings: Vec<Warning>,
}

impl Reporter {
    pub fn new(enabled: impl IntoIterator<Item = WarningKind>) -> Self {
        Self { enabled: enabled.into_iter().collect(), warnings: Vec::new() }
    }

    /// Reporter with every category enabled.
    pub fn all() -> Self {
        Self::new(WarningKind::value_variants().iter().copied())
    }

    pub fn warnings(&self) -> &[Warning] { &self.warnings }

    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }
}

impl Diagnostics for Reporter {
    fn warn(&mut self, kind: WarningKind, message: String) {
        if self.enabled.contains(&kind) {
            tracing::warn!(category = %kind, "{message}");
        }
        self.warnings.push(Warning { kind, message });
    }
}
