//! Session state: the counters, the sticky location and the output log.

use crate::location::Location;
use crate::output::{OutputLine, OutputLog};

/// Everything a running session has accumulated.
///
/// Only [`Session`](crate::Session) mutates it; once finalized it travels inside a
/// [`Report`](crate::Report) as a read-only record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) run_count: usize,
    pub(crate) failed_count: usize,
    pub(crate) planned_count: usize,
    pub(crate) current_location: Option<Location>,
    pub(crate) output: OutputLog,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of assertions evaluated so far.
    pub fn run_count(&self) -> usize {
        self.run_count
    }

    /// Number of assertions that evaluated false.
    pub fn failed_count(&self) -> usize {
        self.failed_count
    }

    /// Sum of every `plan` declaration.
    pub fn planned_count(&self) -> usize {
        self.planned_count
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.current_location.as_ref()
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn lines(&self) -> &[OutputLine] {
        self.output.lines()
    }

    /// At least one assertion failed.
    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }

    /// The number of assertions run differs from the plan.
    pub fn plan_mismatch(&self) -> bool {
        self.planned_count != self.run_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_empty() {
        let state = SessionState::new();
        assert_eq!(state.run_count(), 0);
        assert_eq!(state.failed_count(), 0);
        assert_eq!(state.planned_count(), 0);
        assert!(state.current_location().is_none());
        assert!(state.output().is_empty());
        assert!(!state.has_failures());
        assert!(!state.plan_mismatch());
    }

    #[test]
    fn test_mismatch_is_plan_vs_run() {
        let state = SessionState {
            run_count: 2,
            planned_count: 3,
            ..SessionState::default()
        };
        assert!(state.plan_mismatch());
        assert!(!state.has_failures());
    }
}
