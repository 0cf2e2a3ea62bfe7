//! Remediation capability.
//!
//! The engine only knows "encrypt this file in place, tell me if it
//! worked". Failures are values; nothing panics or errors across the
//! trait boundary.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// In-place file encryption as an injectable capability.
pub trait Encryptor {
    /// Rewrite `path` so a subsequent classification yields `Encrypted`.
    /// Returns `false` on any failure: missing executable, spawn error,
    /// non-zero exit.
    fn encrypt_in_place(&self, path: &Path) -> bool;
}

/// Shells out to the sops binary: `sops --encrypt --in-place <path>`.
pub struct SopsCli {
    program: OsString,
}

impl SopsCli {
    pub fn new() -> Self {
        Self::with_program("sops")
    }

    /// Use a specific executable instead of `sops` from `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for SopsCli {
    fn default() -> Self {
        Self::new()
    }
}

impl Encryptor for SopsCli {
    fn encrypt_in_place(&self, path: &Path) -> bool {
        let status = Command::new(&self.program)
            .arg("--encrypt")
            .arg("--in-place")
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(status) => status.success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_binary_reports_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret.yaml");
        std::fs::write(&path, "plain: text\n").unwrap();

        let encryptor = SopsCli::with_program("definitely-not-a-real-sops-binary");
        assert!(!encryptor.encrypt_in_place(&path));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_reports_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret.yaml");
        std::fs::write(&path, "plain: text\n").unwrap();

        let encryptor = SopsCli::with_program("/bin/false");
        assert!(!encryptor.encrypt_in_place(&path));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_reports_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("secret.yaml");
        std::fs::write(&path, "plain: text\n").unwrap();

        let encryptor = SopsCli::with_program("/bin/true");
        assert!(encryptor.encrypt_in_place(&path));
    }
}
