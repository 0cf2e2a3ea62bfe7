//! Report structure and rendering.
//!
//! The engine returns a [`ComplianceReport`]; this module also holds the
//! thin shell that prints it. Color is an explicit argument to the
//! renderer, never process-wide state.

use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    Pass,
    Fail,
    ConfigMissing,
    NoRules,
}

impl ComplianceStatus {
    /// Process exit code for this outcome. `NoRules` is a valid
    /// "nothing to check" result and exits clean.
    pub fn exit_code(self) -> i32 {
        match self {
            ComplianceStatus::Pass | ComplianceStatus::NoRules => 0,
            ComplianceStatus::Fail => 1,
            ComplianceStatus::ConfigMissing => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Ok,
    MissingEncryption,
    FixedEncryption,
    FixFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub path: String,
    pub kind: OutcomeKind,
}

/// Per-path outcomes in walk order, plus non-fatal warnings and the
/// overall status.
#[derive(Debug)]
pub struct ComplianceReport {
    pub outcomes: Vec<Outcome>,
    pub warnings: Vec<String>,
    pub status: ComplianceStatus,
}

impl ComplianceReport {
    pub(crate) fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            warnings: Vec::new(),
            status: ComplianceStatus::Pass,
        }
    }

    pub(crate) fn config_missing() -> Self {
        Self {
            outcomes: Vec::new(),
            warnings: Vec::new(),
            status: ComplianceStatus::ConfigMissing,
        }
    }

    pub(crate) fn no_rules() -> Self {
        Self {
            outcomes: Vec::new(),
            warnings: Vec::new(),
            status: ComplianceStatus::NoRules,
        }
    }

    pub(crate) fn record(&mut self, path: String, kind: OutcomeKind) {
        if matches!(
            kind,
            OutcomeKind::MissingEncryption | OutcomeKind::FixFailed
        ) {
            self.status = ComplianceStatus::Fail;
        }
        self.outcomes.push(Outcome { path, kind });
    }

    pub(crate) fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn violations(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.kind,
                    OutcomeKind::MissingEncryption | OutcomeKind::FixFailed
                )
            })
            .count()
    }
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn paint(label: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{color}{label}{RESET}")
    } else {
        label.to_string()
    }
}

/// Print the report: outcomes and a summary to `out`, warnings and the
/// config-missing notice to `err`.
pub fn render(
    report: &ComplianceReport,
    out: &mut impl Write,
    err: &mut impl Write,
    use_color: bool,
) -> io::Result<()> {
    for warning in &report.warnings {
        writeln!(err, "{} {warning}", paint("warning:", YELLOW, use_color))?;
    }

    match report.status {
        ComplianceStatus::ConfigMissing => {
            writeln!(err, "No .sops.yaml found; nothing to audit.")?;
            return Ok(());
        }
        ComplianceStatus::NoRules => {
            writeln!(out, "No creation_rules configured; nothing to check.")?;
            return Ok(());
        }
        ComplianceStatus::Pass | ComplianceStatus::Fail => {}
    }

    for outcome in &report.outcomes {
        let label = match outcome.kind {
            OutcomeKind::Ok => paint("[OK]", GREEN, use_color),
            OutcomeKind::MissingEncryption => paint("[MISSING_ENCRYPTION]", RED, use_color),
            OutcomeKind::FixedEncryption => paint("[FIXED]", GREEN, use_color),
            OutcomeKind::FixFailed => paint("[FIX_FAILED]", RED, use_color),
        };
        writeln!(out, "{label} {}", outcome.path)?;
    }

    let checked = report.outcomes.len();
    let violations = report.violations();
    if violations == 0 {
        writeln!(out, "{checked} file(s) checked, all compliant")?;
    } else {
        writeln!(out, "{checked} file(s) checked, {violations} violation(s)")?;
    }

    Ok(())
}
