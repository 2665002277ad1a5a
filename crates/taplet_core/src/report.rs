//! The finalized, render-ready outcome of a session.

use std::io::{self, Write};

use crate::output::OutputLine;
use crate::state::SessionState;

/// A finalized session: the overall verdict and the state it was computed from.
///
/// Rendering only borrows the report, so it can be rendered any number of times with identical results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    success: bool,
    state: SessionState,
}

impl Report {
    pub(crate) fn new(success: bool, state: SessionState) -> Self {
        Self { success, state }
    }

    /// No failed assertions and the plan matched the run count.
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Split into `(success, state)`.
    pub fn into_parts(self) -> (bool, SessionState) {
        (self.success, self.state)
    }

    /// Channel-tagged lines, header first.
    pub fn lines(&self) -> &[OutputLine] {
        self.state.lines()
    }

    /// Literal text of every line, channel tags discarded.
    pub fn render_text(&self) -> Vec<String> {
        self.lines().iter().map(|line| line.text().to_string()).collect()
    }

    /// All lines joined with newlines, no trailing newline.
    pub fn to_tap_string(&self) -> String {
        self.render_text().join("\n")
    }

    /// Write primary lines to `out` and diagnostic lines to `err`, in order.
    pub fn write_channels<O, E>(&self, out: &mut O, err: &mut E) -> io::Result<()>
    where
        O: Write + ?Sized,
        E: Write + ?Sized,
    {
        for line in self.lines() {
            match line {
                OutputLine::Primary(text) => writeln!(out, "{text}")?,
                OutputLine::Diagnostic(text) => {
                    // Keep the two streams in step when they share a terminal.
                    out.flush()?;
                    writeln!(err, "{text}")?;
                    err.flush()?;
                }
            }
        }
        out.flush()
    }

    /// Write every line to `out`, ignoring channels.
    pub fn write_all<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
