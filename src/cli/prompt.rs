//! Interactive terminal prompts.

use crate::output::{OutputFormat, Palette};
use console::Term;
use std::io;

/// Source of answers to interactive questions.
pub trait Prompt {
    /// Show `question` and return the line typed in reply, without the
    /// trailing newline.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompts on the controlling terminal.
///
/// Questions go to stdout for the plain table and to stderr otherwise,
/// so machine-readable output on stdout stays clean.
pub struct TermPrompt {
    term: Term,
    palette: Palette,
}

impl TermPrompt {
    pub fn new(palette: Palette, format: OutputFormat) -> Self {
        let term = match format {
            OutputFormat::Plain => Term::stdout(),
            OutputFormat::Json => Term::stderr(),
        };
        Self { term, palette }
    }
}

impl Prompt for TermPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.term
            .write_str(&self.palette.heading.apply_to(question).to_string())?;
        self.term.read_line()
    }
}
