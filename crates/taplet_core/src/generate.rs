//! The value-producer seam used by `generate_and_log`.

use thiserror::Error;

/// A draw from a generator did not produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct GenerateError {
    pub reason: String,
}

impl GenerateError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Something that can be asked for exactly one value.
///
/// Any `FnOnce() -> T` is an infallible generator; property adapters implement it over their own value sources.
pub trait Generator {
    type Output;

    fn generate(self) -> Result<Self::Output, GenerateError>;
}

impl<T, F> Generator for F
where
    F: FnOnce() -> T,
{
    type Output = T;

    fn generate(self) -> Result<T, GenerateError> {
        Ok(self())
    }
}
