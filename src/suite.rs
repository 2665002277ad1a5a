//! Bundled properties run by `taplet check`.
//!
//! Each property is a plain session body over a [`Draw`]. `subtraction_commutes` is refuted on purpose: it is
//! there to show what a failing run looks like and is skipped unless asked for.

use proptest::prelude::*;
use taplet_core::{Flow, Guard, Session};

use crate::property::Draw;

/// A named session body.
#[derive(Debug, Clone, Copy)]
pub struct Property {
    pub name: &'static str,
    pub about: &'static str,
    /// Expected to fail; only run when selected explicitly or with `--all`.
    pub refuted: bool,
    pub body: fn(&mut Session, &mut Draw) -> Flow,
}

/// Every bundled property, in display order.
pub fn properties() -> &'static [Property] {
    &PROPERTIES
}

/// Look up a bundled property by name.
pub fn find(name: &str) -> Option<&'static Property> {
    PROPERTIES.iter().find(|p| p.name == name)
}

static PROPERTIES: [Property; 5] = [
    Property {
        name: "reverse_involution",
        about: "reversing a vector twice gives it back",
        refuted: false,
        body: reverse_involution,
    },
    Property {
        name: "concat_contains",
        about: "a concatenation contains both of its parts",
        refuted: false,
        body: concat_contains,
    },
    Property {
        name: "parse_round_trip",
        about: "integers survive display then parse",
        refuted: false,
        body: parse_round_trip,
    },
    Property {
        name: "sort_orders",
        about: "sorting yields a non-decreasing permutation",
        refuted: false,
        body: sort_orders,
    },
    Property {
        name: "subtraction_commutes",
        about: "a - b == b - a (false; demonstrates failure output)",
        refuted: true,
        body: subtraction_commutes,
    },
];

fn reverse_involution(t: &mut Session, draw: &mut Draw) -> Flow {
    t.plan(1);
    let v = t.generate_and_log("v", draw.of(prop::collection::vec(any::<i32>(), 0..16)))?;
    let mut twice = v.clone();
    twice.reverse();
    twice.reverse();
    t.assert_equal(&twice, &v);
    Ok(())
}

fn concat_contains(t: &mut Session, draw: &mut Draw) -> Flow {
    t.plan(2);
    let a = t.generate_and_log("a", draw.of("[a-z]{0,8}"))?;
    let b = t.generate_and_log("b", draw.of("[a-z]{0,8}"))?;
    let joined = format!("{a}{b}");
    t.assert_matches(&joined, a.as_str());
    t.assert_matches(&joined, b.as_str());
    Ok(())
}

fn parse_round_trip(t: &mut Session, draw: &mut Draw) -> Flow {
    t.plan(2);
    let n = t.generate_and_log("n", draw.of(any::<i64>()))?;
    let parsed = n.to_string().parse::<i64>();
    t.assert_ok(&parsed).or_stop()?;
    t.assert_equal(&parsed, &Ok(n));
    Ok(())
}

fn sort_orders(t: &mut Session, draw: &mut Draw) -> Flow {
    t.plan(2);
    let v = t.generate_and_log("v", draw.of(prop::collection::vec(any::<u16>(), 0..16)))?;
    let mut sorted = v.clone();
    sorted.sort_unstable();
    t.assert_true(sorted.windows(2).all(|w| w[0] <= w[1]));
    t.assert_equal(&sorted.len(), &v.len());
    Ok(())
}

fn subtraction_commutes(t: &mut Session, draw: &mut Draw) -> Flow {
    t.plan(1);
    let a = t.generate_and_log("a", draw.of(-100i32..100))?;
    let b = t.generate_and_log("b", draw.of(-100i32..100))?;
    t.assert_equal(&(a - b), &(b - a));
    Ok(())
}
