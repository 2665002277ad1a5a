//! Property adapter: TAP sessions as proptest properties.
//!
//! A session body becomes the predicate of a property. Two conventions are supported, both built on the same
//! [`taplet_core::run`]:
//!
//! - [`tap_property`] (pure): a failed session becomes a `TestCaseError` whose reason is the rendered TAP stream.
//!   Nothing is printed; the framework owns reporting.
//! - [`tap_property_io`] (I/O): a failed session prints its lines to stdout, then the verdict is handed back.
//!
//! [`check_property`] drives a body through a proptest [`TestRunner`]. Each case gets a 32-byte seed from the
//! runner and builds its own [`Draw`] from it, so any failing case can be reproduced with [`replay`].
//!
//! ```
//! use proptest::prelude::*;
//! use taplet::property::{Draw, check_property};
//! use taplet::{HarnessConfig, Session};
//!
//! let config = HarnessConfig::new().with_cases(16);
//! let outcome = check_property("addition_commutes", &config, |t: &mut Session, draw: &mut Draw| {
//!     t.plan(1);
//!     let a = t.generate_and_log("a", draw.of(any::<i16>()))? as i32;
//!     let b = t.generate_and_log("b", draw.of(any::<i16>()))? as i32;
//!     t.assert_equal(&(a + b), &(b + a));
//!     Ok(())
//! });
//! assert!(outcome.is_ok());
//! ```

use std::io::{self, Write};

use proptest::array::uniform32;
use proptest::prelude::any;
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::{
    Config, RngAlgorithm, TestCaseError, TestCaseResult, TestError, TestRng, TestRunner,
};
use taplet_core::{Flow, GenerateError, Generator, Report, Session};

use crate::config::{HarnessConfig, PropertyMode, Seed};
use crate::error::HarnessError;

/// Per-case source of generated values.
///
/// Wraps a proptest runner whose RNG is fixed by a [`Seed`], so the same seed yields the same draws.
pub struct Draw {
    runner: TestRunner,
}

/// Rejection budgets for a single draw; pinned so a seed replays the same under any `PROPTEST_*` environment.
const MAX_LOCAL_REJECTS: u32 = 65_536;
const MAX_GLOBAL_REJECTS: u32 = 1_024;
const MAX_FLAT_MAP_REGENS: u32 = 1_000_000;

fn draw_config() -> Config {
    Config {
        cases: 1,
        max_local_rejects: MAX_LOCAL_REJECTS,
        max_global_rejects: MAX_GLOBAL_REJECTS,
        max_flat_map_regens: MAX_FLAT_MAP_REGENS,
        max_shrink_iters: 0,
        failure_persistence: None,
        rng_algorithm: RngAlgorithm::ChaCha,
        ..Config::default()
    }
}

impl Draw {
    pub fn from_seed(seed: Seed) -> Self {
        let rng = TestRng::from_seed(RngAlgorithm::ChaCha, seed.as_bytes());
        Self {
            runner: TestRunner::new_with_rng(draw_config(), rng),
        }
    }

    /// A draw with proptest's fixed deterministic RNG.
    pub fn deterministic() -> Self {
        Self {
            runner: TestRunner::deterministic(),
        }
    }

    /// Draw one value from `strategy`. No shrinking is attempted.
    pub fn value<S: Strategy>(&mut self, strategy: S) -> Result<S::Value, GenerateError> {
        strategy
            .new_tree(&mut self.runner)
            .map(|tree| tree.current())
            .map_err(|reason| GenerateError::new(reason.message()))
    }

    /// Bind `strategy` to this draw as a [`Generator`] for `Session::generate_and_log`.
    pub fn of<S: Strategy>(&mut self, strategy: S) -> Sample<'_, S> {
        Sample {
            draw: self,
            strategy,
        }
    }
}

/// A strategy bound to a [`Draw`]; yields exactly one value.
pub struct Sample<'d, S> {
    draw: &'d mut Draw,
    strategy: S,
}

impl<S: Strategy> Generator for Sample<'_, S> {
    type Output = S::Value;

    fn generate(self) -> Result<S::Value, GenerateError> {
        self.draw.value(self.strategy)
    }
}

/// Pure convention: the rendered stream is the failure reason.
pub fn tap_property<F>(body: F) -> TestCaseResult
where
    F: FnOnce(&mut Session) -> Flow,
{
    let report = taplet_core::run(body);
    if report.is_success() {
        Ok(())
    } else {
        Err(TestCaseError::fail(report.to_tap_string()))
    }
}

/// I/O convention: a failing session is printed to stdout before its verdict is returned.
pub fn tap_property_io<F>(body: F) -> bool
where
    F: FnOnce(&mut Session) -> Flow,
{
    let report = taplet_core::run(body);
    if !report.is_success() {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if let Err(err) = report.write_all(&mut out) {
            tracing::warn!(%err, "failed to print failing session");
        }
    }
    report.is_success()
}

fn run_case<F>(mode: PropertyMode, body: F) -> TestCaseResult
where
    F: FnOnce(&mut Session) -> Flow,
{
    match mode {
        PropertyMode::Pure => tap_property(body),
        PropertyMode::Io => {
            if tap_property_io(body) {
                Ok(())
            } else {
                Err(TestCaseError::fail("TAP session failed"))
            }
        }
    }
}

fn case_runner(config: &HarnessConfig) -> TestRunner {
    let proptest_config = Config {
        cases: config.cases,
        failure_persistence: None,
        ..Config::default()
    };
    match config.seed {
        Some(seed) => {
            let rng = TestRng::from_seed(RngAlgorithm::ChaCha, seed.as_bytes());
            TestRunner::new_with_rng(proptest_config, rng)
        }
        None => TestRunner::new(proptest_config),
    }
}

/// Run `body` as a property under `config`.
///
/// Returns `PropertyFailed` carrying the failing case's seed and the framework's failure reason.
#[tracing::instrument(skip_all, fields(name = %name, cases = config.cases, mode = ?config.mode))]
pub fn check_property<F>(name: &str, config: &HarnessConfig, body: F) -> Result<(), HarnessError>
where
    F: Fn(&mut Session, &mut Draw) -> Flow,
{
    let mut runner = case_runner(config);
    let mode = config.mode;
    // a smaller seed is not a simpler case, so failing seeds are reported as drawn
    let seeds = uniform32(any::<u8>()).prop_map(Seed).no_shrink();

    let outcome = runner.run(&seeds, |seed| {
        let mut draw = Draw::from_seed(seed);
        run_case(mode, |session| body(session, &mut draw))
    });

    match outcome {
        Ok(()) => {
            tracing::info!("property held");
            Ok(())
        }
        Err(TestError::Fail(reason, seed)) => {
            tracing::info!(%seed, "property failed");
            Err(HarnessError::PropertyFailed {
                name: name.to_string(),
                seed,
                reason: reason.message().to_string(),
            })
        }
        Err(TestError::Abort(reason)) => Err(HarnessError::Aborted {
            name: name.to_string(),
            reason: reason.message().to_string(),
        }),
    }
}

/// Re-run one case of a property with the draw fixed by `seed`.
pub fn replay<F>(seed: Seed, body: F) -> Report
where
    F: Fn(&mut Session, &mut Draw) -> Flow,
{
    let mut draw = Draw::from_seed(seed);
    taplet_core::run(|session| body(session, &mut draw))
}

/// Write `report` with TAP lines on stdout and diagnostics on stderr.
pub fn print_report(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();
    report.write_channels(&mut out, &mut err)?;
    err.flush()
}
