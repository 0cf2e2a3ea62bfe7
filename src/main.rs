use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use sops_audit::{
    report, AuditError, Classifier, ComplianceEngine, RuleSet, SopsCli, SopsPolicy,
};

#[derive(Parser)]
#[command(name = "sops-audit")]
#[command(version)]
#[command(about = "Audit a repository for sops-managed secrets left unencrypted", long_about = None)]
struct Cli {
    /// Repository root to audit (default: the enclosing git worktree,
    /// or the current directory outside a repository)
    root: Option<PathBuf>,

    /// Encrypt plaintext violations in place with sops
    #[arg(long)]
    fix: bool,

    /// sops executable to use for --fix
    #[arg(long, default_value = "sops")]
    sops_bin: String,

    /// When to colorize output
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let root = match &cli.root {
        Some(root) => root.clone(),
        None => sops_audit::repo::discover_root()?,
    };

    // A missing policy is a reportable outcome, not a hard error; a present
    // but broken policy (bad YAML, bad pattern) is fatal before any walk.
    let rules = match SopsPolicy::load(&root) {
        Ok(policy) => Some(
            RuleSet::compile(&policy.creation_rules)
                .context("failed to compile creation_rules")?,
        ),
        Err(AuditError::ConfigMissing(_)) => None,
        Err(e) => return Err(e).context("failed to load .sops.yaml"),
    };

    let engine = ComplianceEngine::new(Classifier::sops(), SopsCli::with_program(&cli.sops_bin))
        .with_fix(cli.fix);
    let audit = engine.run(&root, rules.as_ref());

    report::render(
        &audit,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        cli.color.enabled(),
    )?;

    Ok(audit.status.exit_code())
}
