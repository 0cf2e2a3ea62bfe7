//! # sops-audit
//!
//! Audit a repository for [sops](https://github.com/getsops/sops)-managed
//! secrets that are sitting on disk unencrypted.
//!
//! ## Features
//!
//! - **Policy driven**: reads the repository's `.sops.yaml` `creation_rules`
//!   and audits exactly the files the policy says must be encrypted
//! - **Content heuristics**: detects the sops binary-store magic header and
//!   the inline `ENC[...]` ciphertext token, with no dependency on sops
//!   internals and no decryption
//! - **Fix mode**: shells out to `sops --encrypt --in-place` for each
//!   plaintext violation and re-verifies the result before trusting it
//! - **Best effort**: unreadable directories and files degrade to warnings
//!   and violations, never to an aborted run
//! - **CI friendly**: deterministic output order and meaningful exit codes
//!
//! ## Quick Start
//!
//! ```bash
//! # From anywhere inside a repository with a .sops.yaml:
//! sops-audit
//!
//! # Audit a specific directory
//! sops-audit path/to/repo
//!
//! # Encrypt everything the policy flags as plaintext
//! sops-audit --fix
//! ```
//!
//! Typical output:
//!
//! ```text
//! [OK] secrets/encrypted.yaml
//! [MISSING_ENCRYPTION] secrets/plain.yaml
//! 2 file(s) checked, 1 violation(s)
//! ```
//!
//! ## How It Works
//!
//! 1. `.sops.yaml` is loaded from the audit root and each rule's
//!    `path_regex` is compiled, in declaration order, into a full-path
//!    matcher ([`policy`])
//! 2. The tree is walked lazily in stable sorted order; dot directories
//!    (`.git` and friends) are pruned entirely and symlink loops are
//!    detected ([`walker`])
//! 3. Every file whose root-relative, forward-slash path matches a rule is
//!    classified from its current content ([`classify`])
//! 4. Plaintext matches are reported, or in fix mode handed to the
//!    encryptor and then re-classified to confirm the fix took
//!    ([`engine`], [`encryptor`])
//!
//! ## Classification Heuristic
//!
//! A file "looks encrypted" when its content starts with the sops binary
//! magic bytes, or when it is UTF-8 text containing an inline ciphertext
//! token like `ENC[AES256_GCM,data:...]`. Everything else, including empty
//! files and unencrypted binary blobs, is plaintext. Only the first 256 KiB
//! are inspected. Both signals are named constants on
//! [`classify::Classifier`], overridable for deployments using a different
//! encryption tool.
//!
//! ## Exit Codes
//!
//! | Outcome | Code |
//! |---|---|
//! | All matched files encrypted (or fixed) | 0 |
//! | Policy declares no `creation_rules` | 0 |
//! | At least one violation or failed fix | 1 |
//! | No `.sops.yaml` found | 2 |
//!
//! ## Module Overview
//!
//! - [`policy`] - `.sops.yaml` loading and rule compilation
//! - [`walker`] - candidate file discovery with exclusion conventions
//! - [`classify`] - the encrypted/plaintext content heuristic
//! - [`engine`] - the compliance pass tying it all together
//! - [`encryptor`] - the in-place encryption capability (sops CLI)
//! - [`report`] - report structure, rendering, exit-code mapping
//! - [`repo`] - git worktree discovery for the default audit root
//! - [`error`] - error types and unified error handling
//!
//! ## Library Use
//!
//! The engine takes its classifier and encryptor as ordinary values, so
//! embedding or testing it needs no process spawning:
//!
//! ```no_run
//! use sops_audit::{Classifier, ComplianceEngine, RuleSet, SopsCli, SopsPolicy};
//!
//! # fn main() -> sops_audit::Result<()> {
//! let root = std::path::Path::new(".");
//! let policy = SopsPolicy::load(root)?;
//! let rules = RuleSet::compile(&policy.creation_rules)?;
//! let engine = ComplianceEngine::new(Classifier::sops(), SopsCli::new());
//! let report = engine.run(root, Some(&rules));
//! std::process::exit(report.status.exit_code());
//! # }
//! ```

pub mod classify;
pub mod encryptor;
pub mod engine;
pub mod error;
pub mod policy;
pub mod repo;
pub mod report;
pub mod walker;

// Re-export commonly used types
pub use classify::{Classification, Classifier, Classify};
pub use encryptor::{Encryptor, SopsCli};
pub use engine::ComplianceEngine;
pub use error::{AuditError, Result};
pub use policy::{CreationRule, RuleSet, SopsPolicy, POLICY_FILE_NAME};
pub use report::{ComplianceReport, ComplianceStatus, Outcome, OutcomeKind};
