//! The session controller: sequencing, short-circuiting and finalization.
//!
//! A test body is any `FnOnce(&mut Session) -> Flow`. Assertions return `bool`; a body that wants to stop after
//! a failed check turns that `bool` into a [`Flow`] with [`Guard::or_stop`] and propagates it with `?`.
//! Finalization runs no matter how the body returned.
//!
//! ```
//! use taplet_core::{Guard, Session, run};
//!
//! let report = run(|t| {
//!     t.plan(2);
//!     t.assert_equal(&(2 + 2), &4).or_stop()?;
//!     t.assert_matches("hello world", "world");
//!     Ok(())
//! });
//! assert!(report.is_success());
//! assert_eq!(report.render_text(), vec!["1..2", "ok 1", "ok 2"]);
//! ```

use std::fmt;

use crate::location::Location;
use crate::report::Report;
use crate::state::SessionState;

/// Signal that the remaining steps of a session body must be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stop;

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("session stopped early")
    }
}

impl std::error::Error for Stop {}

/// Outcome of a session body or of one composed step.
pub type Flow = Result<(), Stop>;

/// Turn an assertion result into a short-circuit point.
pub trait Guard {
    /// `Ok(())` when the assertion held, `Err(Stop)` otherwise.
    fn or_stop(self) -> Flow;
}

impl Guard for bool {
    fn or_stop(self) -> Flow {
        if self { Ok(()) } else { Err(Stop) }
    }
}

/// A running test session.
///
/// Created fresh by [`run`] (or [`Session::new`]), mutated by every assertion, and consumed by
/// [`Session::finish`], so it can only be finalized once.
#[derive(Debug, Default)]
pub struct Session {
    pub(crate) state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `count` more expected assertions. Declarations add up.
    pub fn plan(&mut self, count: usize) {
        self.state.planned_count += count;
    }

    /// Emit a `# `-prefixed diagnostic. Counters are untouched.
    pub fn diag(&mut self, message: impl fmt::Display) {
        self.state.output.push_diagnostic(message);
    }

    /// Attach `location` to every failure reported from now on, until replaced.
    pub fn record_location(&mut self, location: Location) {
        self.state.current_location = Some(location);
    }

    /// Record the caller's own source position as the current location.
    #[track_caller]
    pub fn here(&mut self) {
        self.record_location(Location::caller());
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Finalize the session: summarize failures or a plan mismatch, then put the plan header first.
    #[tracing::instrument(skip_all, fields(
        run = self.state.run_count,
        failed = self.state.failed_count,
        planned = self.state.planned_count,
    ))]
    pub fn finish(self) -> Report {
        let mut state = self.state;
        let failed = state.has_failures();
        let mismatch = state.plan_mismatch();

        // The failure summary wins; a mismatch is only reported for an otherwise clean run.
        if failed {
            let message = format!(
                "Looks like you failed {} test of {}.",
                state.failed_count, state.planned_count
            );
            state.output.push_diagnostic(message);
        } else if mismatch {
            let message = format!(
                "Looks like you planned {} tests but ran {}.",
                state.planned_count, state.run_count
            );
            state.output.push_diagnostic(message);
        }
        state
            .output
            .prepend_primary(format!("1..{}", state.planned_count));

        let success = !(failed || mismatch);
        tracing::debug!(success, "session finalized");
        Report::new(success, state)
    }
}

/// Run `computation` against a fresh session and finalize it.
///
/// A body that stops early is finalized against whatever it had accumulated.
pub fn run<F>(computation: F) -> Report
where
    F: FnOnce(&mut Session) -> Flow,
{
    let mut session = Session::new();
    if computation(&mut session).is_err() {
        tracing::debug!(run = session.state.run_count, "session body stopped early");
    }
    session.finish()
}
