use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;
use tempfile::TempDir;

/// Convenience helper for spawning the sops-audit binary via assert_cmd.
pub fn sops_audit_cmd() -> Command {
    cargo_bin_cmd!("sops-audit")
}

/// Create a temporary audit root with a one-rule `.sops.yaml`.
#[allow(dead_code)]
pub fn repo_with_policy(pattern: &str) -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    write_policy(temp.path(), pattern);
    temp
}

/// Write a `.sops.yaml` with a single `path_regex` rule.
pub fn write_policy(root: &Path, pattern: &str) {
    std::fs::write(
        root.join(".sops.yaml"),
        format!("creation_rules:\n  - path_regex: '{pattern}'\n"),
    )
    .expect("failed to write .sops.yaml");
}

/// Install an executable fake `sops` into `dir` and return a PATH value
/// that resolves it first.
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_fake_sops(dir: &Path, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let bin_dir = dir.join("bin");
    std::fs::create_dir_all(&bin_dir).expect("failed to create bin dir");
    let bin = bin_dir.join("sops");
    std::fs::write(&bin, script).expect("failed to write fake sops");
    std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod fake sops");

    match std::env::var("PATH") {
        Ok(path) => format!("{}:{path}", bin_dir.display()),
        Err(_) => bin_dir.display().to_string(),
    }
}

/// Fake sops that prepends the binary-store magic to its last argument,
/// like a real in-place encryption would.
#[allow(dead_code)]
pub const FAKE_SOPS_ENCRYPT: &str = "#!/bin/sh
for arg in \"$@\"; do target=\"$arg\"; done
printf 'sops' | cat - \"$target\" > \"$target.tmp\" && mv \"$target.tmp\" \"$target\"
";

/// Fake sops that exits non-zero without touching anything.
#[allow(dead_code)]
pub const FAKE_SOPS_BROKEN: &str = "#!/bin/sh
exit 1
";

/// Fake sops that claims success but leaves the file alone.
#[allow(dead_code)]
pub const FAKE_SOPS_NOOP: &str = "#!/bin/sh
exit 0
";
