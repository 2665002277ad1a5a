//! The taplet session engine.
//!
//! A [`Session`] accumulates assertion outcomes, plan declarations and diagnostics, and finalizes into a
//! [`Report`] that renders as a TAP stream:
//!
//! ```text
//! 1..2
//! ok 1
//! not ok 2
//! # Failed test.
//! #      got: "a"
//! # expected: "b"
//! # Looks like you failed 1 test of 2.
//! ```
//!
//! ## Notes
//!
//! - This crate does **no IO** of its own beyond writing a report into caller-supplied writers, and holds no global
//!   state. Each session is exclusively owned by the body running it.
//! - Assertions never panic; they return `bool`. Early exit is explicit: `assertion.or_stop()?`.

#![deny(clippy::unwrap_used)]

pub mod assert;
pub mod contains;
pub mod generate;
pub mod location;
pub mod output;
pub mod report;
pub mod session;
pub mod state;

pub use contains::Contains;
pub use generate::{GenerateError, Generator};
pub use location::Location;
pub use output::{OutputLine, OutputLog};
pub use report::Report;
pub use session::{Flow, Guard, Session, Stop, run};
pub use state::SessionState;
