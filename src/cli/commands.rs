//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use taplet_core::{Flow, Report, Session};

use crate::config::{HarnessConfig, PropertyMode, Seed};
use crate::error::HarnessError;
use crate::property::{self, Draw, check_property, print_report};
use crate::suite::{self, Property};

use super::{CliError, CliResult, ExitCode};

/// Which bundled properties `check` runs.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Run only the property with this name (refuted or not)
    pub name: Option<String>,
    /// Include refuted demonstration properties
    pub all: bool,
}

/// Print the bundled properties, one per line.
pub fn list_properties() -> CliResult<ExitCode> {
    for property in suite::properties() {
        let marker = if property.refuted { " (refuted)" } else { "" };
        println!("{:<22} {}{}", property.name, property.about, marker);
    }
    Ok(ExitCode::SUCCESS)
}

fn select(selection: &Selection) -> CliResult<Vec<&'static Property>> {
    match &selection.name {
        Some(name) => suite::find(name)
            .map(|p| vec![p])
            .ok_or_else(|| CliError::failure(HarnessError::UnknownProperty(name.clone()).to_string())),
        None => Ok(suite::properties()
            .iter()
            .filter(|p| selection.all || !p.refuted)
            .collect()),
    }
}

/// Run the selected properties and report them as one TAP stream, one result line per property.
pub fn check_properties(selection: &Selection, config: &HarnessConfig) -> CliResult<ExitCode> {
    let selected = select(selection)?;

    let report = taplet_core::run(|t| {
        t.plan(selected.len());
        for property in &selected {
            t.diag(format!("{}: {}", property.name, property.about));
            let outcome = check_property(property.name, config, property.body);
            let held = t.assert_true(outcome.is_ok());
            if let Err(err) = outcome {
                describe_failure(t, property.body, config.mode, err);
            }
            tracing::debug!(property = property.name, held, "property checked");
        }
        Ok(())
    });

    emit(&report)
}

/// Fold a property failure into the surrounding session as diagnostics.
///
/// A pure-mode failure is replayed so its session shows up line by line; an I/O-mode failure already printed
/// its session while it ran.
fn describe_failure(
    t: &mut Session,
    body: fn(&mut Session, &mut Draw) -> Flow,
    mode: PropertyMode,
    err: HarnessError,
) {
    match err {
        HarnessError::PropertyFailed { seed, .. } => {
            t.diag(format!("failing case seed {seed}"));
            if mode == PropertyMode::Pure {
                for line in property::replay(seed, body).render_text() {
                    t.diag(format!("  {line}"));
                }
            }
        }
        other => t.diag(other),
    }
}

/// Re-run one case of a bundled property and print its session.
pub fn replay_property(name: &str, seed: Seed) -> CliResult<ExitCode> {
    let property = suite::find(name)
        .ok_or_else(|| CliError::failure(HarnessError::UnknownProperty(name.to_string()).to_string()))?;
    let report = property::replay(seed, property.body);
    emit(&report)
}

/// Check one property and, when it fails, print the failing case's session.
pub fn run_property<F>(name: &str, config: &HarnessConfig, body: F) -> CliResult<ExitCode>
where
    F: Fn(&mut Session, &mut Draw) -> Flow,
{
    match check_property(name, config, &body) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(HarnessError::PropertyFailed { seed, .. }) => {
            if config.mode == PropertyMode::Pure {
                print_report(&property::replay(seed, &body)).map_err(write_error)?;
            }
            Err(CliError::failure(format!(
                "property `{name}` failed for case seed {seed}"
            )))
        }
        Err(other) => Err(CliError::failure(other.to_string())),
    }
}

fn write_error(e: std::io::Error) -> CliError {
    CliError::failure(format!("Error writing report: {}", e))
}

fn emit(report: &Report) -> CliResult<ExitCode> {
    print_report(report).map_err(write_error)?;
    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_skips_refuted() {
        let selected = select(&Selection::default()).unwrap();
        assert!(!selected.is_empty());
        assert!(selected.iter().all(|p| !p.refuted));
    }

    #[test]
    fn test_all_includes_refuted() {
        let selected = select(&Selection {
            name: None,
            all: true,
        })
        .unwrap();
        assert_eq!(selected.len(), suite::properties().len());
    }

    #[test]
    fn test_named_selection() {
        let selected = select(&Selection {
            name: Some("subtraction_commutes".to_string()),
            all: false,
        })
        .unwrap();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].refuted);
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let err = select(&Selection {
            name: Some("nope".to_string()),
            all: false,
        })
        .unwrap_err();
        assert_eq!(err.message, "unknown property: nope");
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_describe_failure_replays_pure_sessions() {
        let body = suite::find("subtraction_commutes").unwrap().body;
        let mut session = Session::new();
        let err = HarnessError::PropertyFailed {
            name: "subtraction_commutes".to_string(),
            seed: Seed([2; 32]),
            reason: String::new(),
        };
        describe_failure(&mut session, body, PropertyMode::Pure, err);

        let lines: Vec<&str> = session.state().lines().iter().map(|l| l.text()).collect();
        assert_eq!(lines[0], format!("# failing case seed {}", Seed([2; 32])));
        assert!(lines.iter().skip(1).all(|l| l.starts_with("#   ")));
        assert_eq!(session.state().run_count(), 0);
    }

    fn quick_config() -> HarnessConfig {
        HarnessConfig::new().with_cases(16).with_seed(Seed([5; 32]))
    }

    fn refuted_seed() -> Seed {
        let body = suite::find("subtraction_commutes").unwrap().body;
        match check_property("subtraction_commutes", &quick_config(), body) {
            Err(HarnessError::PropertyFailed { seed, .. }) => seed,
            other => panic!("subtraction_commutes should be refuted, got {other:?}"),
        }
    }

    #[test]
    fn test_run_property_holds_exits_success() {
        let body = suite::find("reverse_involution").unwrap().body;
        let code = run_property("reverse_involution", &quick_config(), body).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_run_property_refuted_exits_failure() {
        let body = suite::find("subtraction_commutes").unwrap().body;
        let err = run_property("subtraction_commutes", &quick_config(), body).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.starts_with("property `subtraction_commutes` failed for case seed "));
    }

    #[test]
    fn test_check_sound_properties_exits_success() {
        let code = check_properties(&Selection::default(), &quick_config()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn test_check_with_refuted_exits_failure() {
        let selection = Selection {
            name: None,
            all: true,
        };
        let err = check_properties(&selection, &quick_config()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_check_unknown_name_exits_failure() {
        let selection = Selection {
            name: Some("nope".to_string()),
            all: false,
        };
        let err = check_properties(&selection, &quick_config()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.message, "unknown property: nope");
    }

    #[test]
    fn test_replay_failing_seed_exits_failure() {
        let err = replay_property("subtraction_commutes", refuted_seed()).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_replay_unknown_name_exits_failure() {
        let err = replay_property("nope", Seed([0; 32])).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert_eq!(err.message, "unknown property: nope");
    }

    #[test]
    fn test_describe_failure_io_mode_only_names_seed() {
        let body = suite::find("subtraction_commutes").unwrap().body;
        let mut session = Session::new();
        let err = HarnessError::PropertyFailed {
            name: "subtraction_commutes".to_string(),
            seed: Seed([2; 32]),
            reason: String::new(),
        };
        describe_failure(&mut session, body, PropertyMode::Io, err);
        assert_eq!(session.state().lines().len(), 1);
    }
}
