//! Property execution configuration for taplet

use std::fmt;
use std::str::FromStr;

use crate::error::HarnessError;

/// Length of the seed that fixes a property run's random stream.
pub const SEED_LEN: usize = 32;

/// How a failing session is surfaced while a property runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyMode {
    /// The session's lines become the failure reason; nothing is printed while cases run.
    #[default]
    Pure,
    /// A failing session prints its lines to stdout before the verdict is reported.
    Io,
}

/// Property execution configuration
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Number of successful cases required before a property passes
    pub cases: u32,
    /// Seed for the case runner; `None` draws a fresh one from the OS
    pub seed: Option<Seed>,
    /// Failure surfacing mode
    pub mode: PropertyMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        // proptest's own default case count
        Self {
            cases: 256,
            seed: None,
            mode: PropertyMode::Pure,
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of cases
    pub fn with_cases(mut self, cases: u32) -> Self {
        self.cases = cases;
        self
    }

    /// Fix the runner seed
    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Set the failure surfacing mode
    pub fn with_mode(mut self, mode: PropertyMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A 32-byte seed that fixes a random stream, written as 64 hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub [u8; SEED_LEN]);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl From<[u8; SEED_LEN]> for Seed {
    fn from(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Seed {
    type Err = HarnessError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || HarnessError::InvalidSeed(text.to_string());
        let digits = text.trim();
        if digits.len() != SEED_LEN * 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let mut seed = [0u8; SEED_LEN];
        for (byte, pair) in seed.iter_mut().zip(digits.as_bytes().chunks(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
        }
        Ok(Self(seed))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.cases, 256);
        assert!(config.seed.is_none());
        assert_eq!(config.mode, PropertyMode::Pure);
    }

    #[test]
    fn test_builder_chain() {
        let config = HarnessConfig::new()
            .with_cases(10)
            .with_seed([7; SEED_LEN])
            .with_mode(PropertyMode::Io);

        assert_eq!(config.cases, 10);
        assert_eq!(config.seed, Some(Seed([7; SEED_LEN])));
        assert_eq!(config.mode, PropertyMode::Io);
    }

    #[test]
    fn test_builder_override() {
        let config = HarnessConfig::new().with_cases(1).with_cases(99);
        assert_eq!(config.cases, 99); // Last value wins
    }

    #[test]
    fn test_seed_hex_round_trip() {
        let mut seed = [0u8; SEED_LEN];
        for (i, byte) in seed.iter_mut().enumerate() {
            *byte = (i * 9) as u8;
        }
        let text = Seed(seed).to_string();
        assert_eq!(text.len(), 64);
        assert_eq!(text.parse::<Seed>().unwrap(), Seed(seed));
    }

    #[test]
    fn test_parse_seed_rejects_bad_input() {
        assert!(matches!("abc".parse::<Seed>(), Err(HarnessError::InvalidSeed(_))));
        assert!("zz".repeat(SEED_LEN).parse::<Seed>().is_err());
        assert!("é".repeat(SEED_LEN).parse::<Seed>().is_err());
        assert!(format!("+{}", "0".repeat(63)).parse::<Seed>().is_err());
    }
}
