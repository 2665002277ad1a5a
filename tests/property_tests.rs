//! Property-based tests for the taplet adapter
//!
//! Sessions are used here the way downstream crates use them: as the predicate of a `proptest!` case, and
//! through the seeded `check_property` driver.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use taplet::{Draw, Guard, HarnessConfig, HarnessError, PropertyMode, Seed, Session, check_property, replay};

// =============================================================================
// Pure convention inside proptest!
// =============================================================================

proptest! {
    /// Property: addition commutes, phrased as a TAP session
    #[test]
    fn addition_commutes(a in any::<i16>(), b in any::<i16>()) {
        taplet::tap_property(|t| {
            t.plan(1);
            t.assert_equal(&(i32::from(a) + i32::from(b)), &(i32::from(b) + i32::from(a)));
            Ok(())
        })?;
    }

    /// Property: a string always contains its own prefixes
    #[test]
    fn prefixes_are_contained(s in "[a-z]{0,12}", cut in 0usize..13) {
        let cut = cut.min(s.len());
        taplet::tap_property(|t| {
            t.plan(2);
            t.assert_matches(&s, &s[..cut]);
            t.assert_not_matches(&s, "Z");
            Ok(())
        })?;
    }

    /// Property: parsing what was displayed gives an `Ok`
    #[test]
    fn displayed_integers_parse(n in any::<u64>()) {
        taplet::tap_property(|t| {
            t.plan(2);
            let parsed = n.to_string().parse::<u64>();
            t.assert_ok(&parsed).or_stop()?;
            t.assert_equal(&parsed, &Ok(n));
            Ok(())
        })?;
    }
}

#[test]
fn pure_failure_reason_is_the_rendered_stream() {
    let outcome = taplet::tap_property(|t| {
        t.plan(2);
        t.assert_equal(&"left", &"right");
        Ok(())
    });

    let reason = match outcome {
        Err(TestCaseError::Fail(reason)) => reason,
        other => panic!("expected a failing case, got {other:?}"),
    };
    insta::assert_snapshot!(reason.message(), @r##"
1..2
not ok 1
# Failed test.
#      got: "left"
# expected: "right"
# Looks like you failed 1 test of 2.
"##);
}

#[test]
fn io_convention_reports_verdict() {
    assert!(taplet::tap_property_io(|t| {
        t.plan(1);
        t.assert_true(true);
        Ok(())
    }));
    assert!(!taplet::tap_property_io(|t| {
        t.plan(1);
        t.assert_true(false);
        Ok(())
    }));
}

// =============================================================================
// Seeded driver
// =============================================================================

fn bounded_sum(t: &mut Session, draw: &mut Draw) -> taplet::Flow {
    t.plan(1);
    let a = t.generate_and_log("a", draw.of(0u32..50))?;
    let b = t.generate_and_log("b", draw.of(0u32..50))?;
    t.assert_true(a + b < 60);
    Ok(())
}

#[test]
fn driver_is_deterministic_under_a_fixed_seed() {
    let config = HarnessConfig::new().with_cases(128).with_seed(Seed([42; 32]));

    let first = check_property("bounded_sum", &config, bounded_sum);
    let second = check_property("bounded_sum", &config, bounded_sum);

    match (first, second) {
        (
            Err(HarnessError::PropertyFailed { seed: a, .. }),
            Err(HarnessError::PropertyFailed { seed: b, .. }),
        ) => assert_eq!(a, b),
        (Ok(()), Ok(())) => {}
        other => panic!("runs diverged: {other:?}"),
    }
}

#[test]
fn failing_case_replays_from_its_seed() {
    let config = HarnessConfig::new().with_cases(256).with_seed(Seed([7; 32]));
    let Err(HarnessError::PropertyFailed { seed, .. }) = check_property("bounded_sum", &config, bounded_sum) else {
        panic!("bounded_sum should be refuted within 256 cases");
    };

    let report = replay(seed, bounded_sum);
    let text = report.render_text();
    assert!(!report.is_success());
    assert_eq!(text[0], "1..1");
    assert!(text[1].starts_with("# a: "));
    assert!(text[2].starts_with("# b: "));
    assert_eq!(text[3], "not ok 1");
    assert_eq!(text.last().map(String::as_str), Some("# Looks like you failed 1 test of 1."));
}

#[test]
fn io_mode_still_reports_failure_to_the_driver() {
    let config = HarnessConfig::new()
        .with_cases(16)
        .with_seed(Seed([1; 32]))
        .with_mode(PropertyMode::Io);
    let outcome = check_property("always_fails", &config, |t, _draw| {
        t.plan(1);
        t.assert_true(false);
        Ok(())
    });
    assert!(matches!(outcome, Err(HarnessError::PropertyFailed { .. })));
}

#[test]
fn stopped_sessions_still_count_as_failures() {
    let config = HarnessConfig::new().with_cases(8).with_seed(Seed([3; 32]));
    let outcome = check_property("stops", &config, |t, draw| {
        t.plan(3);
        let n = t.generate_and_log("n", draw.of(0u8..10))?;
        t.assert_true(n > 100).or_stop()?;
        t.assert_true(true);
        t.assert_true(true);
        Ok(())
    });
    let Err(HarnessError::PropertyFailed { reason, .. }) = outcome else {
        panic!("expected failure");
    };
    assert!(reason.contains("not ok 1"));
    assert!(!reason.contains("ok 2"));
}
