//! Output sink for generated code.
//!
//! Header comment text is buffered and written exactly once, immediately
//! before the first structural write. Header text added after that point is
//! still accepted but reported, since it can no longer reach the output.
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::diagnostics::{Diagnostics, WarningKind};

const HEADER_PREAMBLE: &str = "/* Generated by genbind\n";

pub struct OutputSink<W: Write> {
    out: W,
    header: String,
    header_written: bool,
}

impl OutputSink<Box<dyn Write>> {
    /// Open `path` for writing, or standard output when `None`.
    pub fn open(path: Option<&Path>) -> io::Result<Self> {
        let out: Box<dyn Write> = match path {
            None => Box::new(io::stdout().lock()),
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        };
        Ok(Self::new(out))
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, header: HEADER_PREAMBLE.to_string(), header_written: false }
    }

    pub fn header_comment(&mut self, comment: &str, diag: &mut dyn Diagnostics) {
        self.header.push('\n');
        self.header.push_str(comment);
        if self.header_written {
            diag.warn(WarningKind::Output, "adding header comments after output already started".to_string());
        }
    }

    fn flush_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            self.header_written = true;
            write!(self.out, "{}\n*/\n\n", self.header)?;
        }
        Ok(())
    }

    /// Structural write; the header goes out first if it has not yet.
    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        self.flush_header()?;
        self.out.write_fmt(args)
    }

    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.flush_header()?;
        self.out.write_all(text.as_bytes())
    }

    pub fn begin_interface(&mut self, interface: &str) -> io::Result<()> {
        write!(self, "/* interface {interface} */\n\n")
    }

    /// Flush everything and hand back the underlying writer.
    pub fn close(mut self) -> io::Result<W> {
        self.flush_header()?;
        self.out.flush()?;
        Ok(self.out)
    }
}
