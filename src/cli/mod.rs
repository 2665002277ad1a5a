//! CLI module for taplet
//!
//! This module provides the command-line interface for running TAP properties.
//!
//! ## Commands
//!
//! - `list` - Show the bundled properties
//! - `check` - Run properties and report them as a TAP stream
//! - `replay <name> <seed>` - Re-run one failing case of a bundled property
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only `run()` and `property_main()` handle errors and exit.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::process;

use clap::{Parser, Subcommand};
use taplet_core::{Flow, Session};

use crate::config::{HarnessConfig, PropertyMode, Seed};
use crate::property::Draw;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// TAP sessions checked as properties
#[derive(Parser, Debug)]
#[command(name = "taplet")]
#[command(version = VERSION)]
#[command(about = "Run TAP test sessions as property-based tests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the bundled properties
    List,

    /// Run properties and report the outcome as TAP
    Check {
        /// Run only the property with this name
        #[arg(short = 'k', value_name = "NAME")]
        filter: Option<String>,
        /// Successful cases required per property (default: 256)
        #[arg(long, value_name = "N")]
        cases: Option<u32>,
        /// Fix the case runner seed (64 hex digits)
        #[arg(long, value_name = "HEX")]
        seed: Option<Seed>,
        /// Print failing sessions as they happen instead of folding them into the report
        #[arg(long)]
        io: bool,
        /// Include refuted demonstration properties
        #[arg(long)]
        all: bool,
    },

    /// Re-run a single case of a bundled property
    Replay {
        /// Property name
        #[arg(value_name = "NAME")]
        name: String,
        /// Case seed printed by a failing `check`
        #[arg(value_name = "SEED")]
        seed: Seed,
    },
}

// ============================================================================
// CLI entry points
// ============================================================================

/// Main CLI entry point.
///
/// All command implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    exit_with(execute(cli));
}

/// Check a single property and exit with its verdict.
///
/// Intended as the whole body of a standalone test binary's `main`.
pub fn property_main<F>(name: &str, config: &HarnessConfig, body: F) -> !
where
    F: Fn(&mut Session, &mut Draw) -> Flow,
{
    exit_with(commands::run_property(name, config, body));
    process::exit(ExitCode::SUCCESS.0)
}

fn exit_with(result: CliResult<ExitCode>) {
    match result {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::List => commands::list_properties(),
        Command::Check {
            filter,
            cases,
            seed,
            io,
            all,
        } => {
            let config = harness_config(cases, seed, io);
            let selection = commands::Selection { name: filter, all };
            commands::check_properties(&selection, &config)
        }
        Command::Replay { name, seed } => commands::replay_property(&name, seed),
    }
}

fn harness_config(cases: Option<u32>, seed: Option<Seed>, io: bool) -> HarnessConfig {
    let mut config = HarnessConfig::new();
    if let Some(cases) = cases {
        config = config.with_cases(cases);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if io {
        config = config.with_mode(PropertyMode::Io);
    }
    config
}

// ============================================================================
// Tests
// ============================================================================
