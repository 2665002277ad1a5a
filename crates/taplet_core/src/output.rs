//! The diagnostics buffer: every line a session emits, tagged by channel.
//!
//! Primary lines are the TAP stream proper (`1..N`, `ok N`, `not ok N`). Diagnostic lines are `#`-prefixed
//! commentary that consumers route to a secondary channel such as stderr.

use std::fmt;

/// Prefix carried by every diagnostic line.
pub const DIAGNOSTIC_PREFIX: &str = "# ";

/// One emitted line, tagged with the channel it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// TAP result lines and the plan header.
    Primary(String),
    /// `#`-prefixed commentary.
    Diagnostic(String),
}

impl OutputLine {
    /// The literal text of the line, without its channel tag.
    pub fn text(&self) -> &str {
        match self {
            OutputLine::Primary(text) | OutputLine::Diagnostic(text) => text,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, OutputLine::Primary(_))
    }

    pub fn is_diagnostic(&self) -> bool {
        matches!(self, OutputLine::Diagnostic(_))
    }
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Append-only, chronologically ordered log of output lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    lines: Vec<OutputLine>,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primary-channel line.
    pub fn push_primary(&mut self, text: impl Into<String>) {
        self.lines.push(OutputLine::Primary(text.into()));
    }

    /// Append a diagnostic line, adding the `# ` prefix.
    pub fn push_diagnostic(&mut self, message: impl fmt::Display) {
        self.lines
            .push(OutputLine::Diagnostic(format!("{DIAGNOSTIC_PREFIX}{message}")));
    }

    /// Put the plan header in front of everything emitted so far.
    pub(crate) fn prepend_primary(&mut self, text: impl Into<String>) {
        self.lines.insert(0, OutputLine::Primary(text.into()));
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutputLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<'a> IntoIterator for &'a OutputLog {
    type Item = &'a OutputLine;
    type IntoIter = std::slice::Iter<'a, OutputLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
