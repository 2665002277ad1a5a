//! The assertion engine.
//!
//! `assert_true` is the only operation that touches the counters. Every other assertion is `assert_true` on its
//! condition followed by [`Session::on_failure`], which adds the explanatory diagnostics only when the check
//! failed.

use std::fmt::{self, Debug};

use crate::contains::Contains;
use crate::generate::Generator;
use crate::location::at_suffix;
use crate::session::{Session, Stop};

impl Session {
    /// Record one assertion: `ok N` when `condition` holds, `not ok N` plus a failure note otherwise.
    pub fn assert_true(&mut self, condition: bool) -> bool {
        let state = &mut self.state;
        state.run_count += 1;
        let number = state.run_count;

        if condition {
            state.output.push_primary(format!("ok {number}"));
        } else {
            state.failed_count += 1;
            state.output.push_primary(format!("not ok {number}"));
            let at = at_suffix(state.current_location.as_ref());
            state.output.push_diagnostic(format!("Failed test{at}."));
        }

        tracing::trace!(number, passed = condition, "assertion evaluated");
        condition
    }

    /// Passes when `got != expected`.
    pub fn assert_not_equal<T>(&mut self, got: &T, expected: &T) -> bool
    where
        T: PartialEq + Debug + ?Sized,
    {
        let passed = self.assert_true(got != expected);
        self.on_failure(passed, |s| {
            s.diag_vals("got:", format!("{got:?}"), "expected:", "anything else")
        })
    }

    /// Passes when `got == expected`.
    pub fn assert_equal<T>(&mut self, got: &T, expected: &T) -> bool
    where
        T: PartialEq + Debug + ?Sized,
    {
        let passed = self.assert_true(got == expected);
        self.on_failure(passed, |s| {
            s.diag_vals("got:", format!("{got:?}"), "expected:", format!("{expected:?}"))
        })
    }

    /// Passes when `pattern` occurs in `got`.
    pub fn assert_matches<H, N>(&mut self, got: &H, pattern: &N) -> bool
    where
        H: Contains<N> + Debug + ?Sized,
        N: Debug + ?Sized,
    {
        let passed = self.assert_true(got.contains_like(pattern));
        self.on_failure(passed, |s| {
            s.diag_vals("", format!("{got:?}"), "doesn't match", format!("{pattern:?}"))
        })
    }

    /// Passes when `pattern` does not occur in `got`.
    pub fn assert_not_matches<H, N>(&mut self, got: &H, pattern: &N) -> bool
    where
        H: Contains<N> + Debug + ?Sized,
        N: Debug + ?Sized,
    {
        let passed = self.assert_true(!got.contains_like(pattern));
        self.on_failure(passed, |s| {
            s.diag_vals("", format!("{got:?}"), "matches", format!("{pattern:?}"))
        })
    }

    /// Passes when `result` is `Ok`.
    ///
    /// The failure diagnostics read `got Err: {err:?}` then `expected: Ok`.
    pub fn assert_ok<T, E: Debug>(&mut self, result: &Result<T, E>) -> bool {
        let passed = self.assert_true(result.is_ok());
        self.on_failure(passed, |s| {
            if let Err(err) = result {
                s.diag_vals("got Err:", format!("{err:?}"), "expected:", "Ok");
            }
        })
    }

    /// Run `report` only when `passed` is false; hands `passed` back for chaining.
    pub fn on_failure(&mut self, passed: bool, report: impl FnOnce(&mut Self)) -> bool {
        if !passed {
            report(self);
        }
        passed
    }

    /// Emit two labeled diagnostics with their value columns aligned.
    ///
    /// Only the first line is padded, by `len(second_label) - len(first_label)` spaces when positive.
    pub fn diag_vals(
        &mut self,
        first_label: &str,
        first_value: impl fmt::Display,
        second_label: &str,
        second_value: impl fmt::Display,
    ) {
        let pad = second_label.len().saturating_sub(first_label.len());
        self.diag(format!("{}{first_label} {first_value}", " ".repeat(pad)));
        self.diag(format!("{second_label} {second_value}"));
    }

    /// Draw one value from `generator`, log it, and hand it back.
    ///
    /// A draw that fails is logged and stops the session body.
    pub fn generate_and_log<G>(&mut self, label: &str, generator: G) -> Result<G::Output, Stop>
    where
        G: Generator,
        G::Output: Debug,
    {
        match generator.generate() {
            Ok(value) => {
                let at = at_suffix(self.state.current_location.as_ref());
                self.diag(format!("{label}: {value:?}{at}."));
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(label, %err, "generator produced no value");
                self.diag(format!("{label}: generation failed: {err}"));
                Err(Stop)
            }
        }
    }
}
