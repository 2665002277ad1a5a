#![forbid(unsafe_code)]
//! taplet: TAP test sessions checked as properties
//!
//! The session engine lives in `taplet_core` and is re-exported here. This crate adds the property adapter that
//! runs sessions under proptest, the bundled properties, and the `taplet` command line.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module and
//!   `taplet_core` enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Early exit**: A session body stops by returning `Err(Stop)`, never by panicking.

pub mod cli;
pub mod config;
pub mod error;
pub mod property;
pub mod suite;

pub use taplet_core::{
    Contains, Flow, GenerateError, Generator, Guard, Location, OutputLine, OutputLog, Report, Session, SessionState,
    Stop, run,
};

pub use config::{HarnessConfig, PropertyMode, Seed};
pub use error::HarnessError;
pub use property::{Draw, check_property, replay, tap_property, tap_property_io};
