//! Errors surfaced by property execution.

use thiserror::Error;

use crate::config::Seed;

/// Errors that occur while running properties
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("property `{name}` failed for case seed {seed}\n{reason}")]
    PropertyFailed {
        name: String,
        seed: Seed,
        reason: String,
    },

    #[error("property `{name}` aborted: {reason}")]
    Aborted { name: String, reason: String },

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("invalid seed `{0}`: expected 64 hex digits")]
    InvalidSeed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
