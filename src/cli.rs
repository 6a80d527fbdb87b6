//! Command line front end: parse arguments, load both trees, generate, and
//! map the first failure to a process status.
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;

use crate::ast;
use crate::codegen::{self, OutputSink};
use crate::config::Options;
use crate::diagnostics::{Reporter, WarningKind};
use crate::error::{ConfigError, GenError, ParseError};
use crate::genbind::GenbindNode;
use crate::load::{self, AstLoader, JsonAstLoader};
use crate::webidl::WebidlNode;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate engine property bindings from a binding specification and the WebIDL it names
#[derive(Parser, Debug)]
#[command(name = "genbind", version)]
pub struct CommandLineInterface {
    /// directory searched for WebIDL files (repeatable)
    #[arg(short = 'I', value_name = "DIR")]
    idl_path: Vec<PathBuf>,

    /// output .c file (stdout if omitted)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// dump both syntax trees to stdout before generating
    #[arg(short = 'v', default_value_t = false)]
    verbose: bool,

    /// debug logging
    #[arg(short = 'd', default_value_t = false)]
    debug: bool,

    /// report only these warning categories (repeatable; all when omitted)
    #[arg(short = 'W', value_name = "CATEGORY", value_enum)]
    warnings: Vec<WarningKind>,

    /// binding specification tree (JSON)
    input: PathBuf,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn into_options(self) -> Options {
        Options {
            input: self.input,
            output: self.output,
            search_path: self.idl_path,
            verbose: self.verbose,
            debug: self.debug,
            warnings: self.warnings,
        }
    }
}

/// Full program run over `args` (program name first); returns the status.
pub fn main_with_args<I, T>(args: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = match CommandLineInterface::try_parse_from(args) {
        Ok(cli) => cli.into_options(),
        Err(error) => {
            let _ = error.print();
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => ConfigError::Usage(error.to_string()).status(),
            };
        }
    };
    crate::logging::init_tracing(options.debug);

    match run(&options) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("{} {error:#}", "error:".red().bold());
            exit_status(&error)
        }
    }
}

/// Validate, load through the JSON loader, and generate.
pub fn run(options: &Options) -> anyhow::Result<()> {
    options.validate()?;
    let loader = JsonAstLoader::new(options.search_path.clone());
    generate(options, &loader)
}

/// Generate with an arbitrary loader. A partially written output file is
/// removed when generation fails.
pub fn generate(options: &Options, loader: &dyn AstLoader) -> anyhow::Result<()> {
    let genbind = loader
        .parse_binding_spec(&options.input)
        .with_context(|| format!("parse failed for {}", options.input.display()))?;
    let webidl = load::load_webidl(loader, &genbind).context("parse failed for WebIDL")?;

    if options.verbose {
        dump_trees(&genbind, &webidl).context("unable to dump syntax trees")?;
    }

    let mut diag = Reporter::new(options.enabled_warnings());
    let result = write_output(options, &genbind, &webidl, &mut diag);
    tracing::debug!(warnings = diag.warnings().len(), ok = result.is_ok(), "generation finished");

    if result.is_err() {
        if let Some(path) = options.output.as_deref() {
            if let Err(error) = fs::remove_file(path) {
                tracing::warn!(path = %path.display(), %error, "unable to remove partial output");
            }
        }
    }
    result.context("output failed")
}

/// Process status for a failure: the status carried by the first typed
/// error in the chain, else a usage failure.
pub fn exit_status(error: &anyhow::Error) -> u8 {
    if let Some(error) = error.downcast_ref::<ConfigError>() {
        return error.status();
    }
    if let Some(error) = error.downcast_ref::<ParseError>() {
        return error.status();
    }
    if let Some(error) = error.downcast_ref::<GenError>() {
        return error.status();
    }
    1
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(
    options: &Options,
    genbind: &[GenbindNode],
    webidl: &[WebidlNode],
    diag: &mut Reporter,
) -> Result<(), GenError> {
    let mut out = OutputSink::open(options.output.as_deref())?;
    codegen::output_binding(genbind, webidl, &mut out, diag)?;
    out.close()?;
    Ok(())
}

fn dump_trees(genbind: &[GenbindNode], webidl: &[WebidlNode]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(ast::dump(genbind).as_bytes())?;
    stdout.write_all(ast::dump(webidl).as_bytes())?;
    stdout.flush()
}
