//! # Policy Loading and Rule Compilation
//!
//! Reads the repository's `.sops.yaml` and compiles its `creation_rules`
//! into an ordered set of path matchers.
//!
//! A sops policy looks like:
//!
//! ```yaml
//! creation_rules:
//!   - path_regex: secrets/.*\.yaml
//!     pgp: FINGERPRINT
//!   - path_regex: \.env\.production
//! ```
//!
//! Only `path_regex` matters for the audit; every other field (`kms`, `pgp`,
//! `age`, `encrypted_regex`, ...) is accepted and ignored so that real-world
//! policies load unchanged. Rules without a `path_regex` act as catch-alls
//! for sops itself but carry no path constraint, so they are skipped here.
//!
//! ## Matching Semantics
//!
//! Each `path_regex` is applied to the candidate's path relative to the
//! audit root, with forward-slash separators on every platform. Patterns
//! match the full relative path, not a substring: `secret` does not match
//! `mysecrets.txt`. Explicit `^`/`$` anchors inside a pattern remain valid.
//! Matching is case-sensitive and declaration order is preserved.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use crate::error::{AuditError, Result};

/// Conventional policy file name, looked up at the audit root.
pub const POLICY_FILE_NAME: &str = ".sops.yaml";

#[derive(Debug, Deserialize)]
pub struct SopsPolicy {
    #[serde(default)]
    pub creation_rules: Vec<CreationRule>,
}

#[derive(Debug, Deserialize)]
pub struct CreationRule {
    #[serde(default)]
    pub path_regex: Option<String>,
}

impl SopsPolicy {
    /// Load the policy file from the audit root.
    ///
    /// A missing file is `AuditError::ConfigMissing`; a present but
    /// unparsable file is `AuditError::ConfigInvalid`. Both are fatal
    /// before any tree I/O happens.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(POLICY_FILE_NAME);
        if !path.is_file() {
            return Err(AuditError::ConfigMissing(root.to_path_buf()));
        }
        let text = fs::read_to_string(&path)?;
        let policy = serde_yaml::from_str(&text)?;
        Ok(policy)
    }
}

/// Ordered set of compiled `path_regex` matchers.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Regex>,
}

impl RuleSet {
    /// Compile rules in declaration order.
    ///
    /// Fails with `InvalidPattern` naming the offending pattern text; the
    /// run never proceeds with a partial rule set. An empty input is valid
    /// and yields an empty set ("nothing to check", not an error).
    pub fn compile(rules: &[CreationRule]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let Some(pattern) = rule.path_regex.as_deref() else {
                continue;
            };
            // Full-path match: a bare `secret` must not match `mysecrets.txt`.
            let anchored = format!("^(?:{pattern})$");
            let regex = Regex::new(&anchored).map_err(|source| AuditError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            compiled.push(regex);
        }
        Ok(Self { rules: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if any rule matches the full relative path.
    ///
    /// Rules are purely positive today; first-match-wins only becomes
    /// observable if per-rule behavior is ever added.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(rel_path))
    }
}
