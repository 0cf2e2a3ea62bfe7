//! # Compliance Engine
//!
//! One pass over the tree: walk, match, classify, and in fix mode
//! remediate. The classifier and encryptor are constructor-supplied
//! capabilities so tests swap them with plain values instead of patching.
//!
//! Per matched path:
//!
//! - `Encrypted` → `Ok`.
//! - `Plaintext`, audit mode → `MissingEncryption`, overall `Fail`.
//! - `Plaintext`, fix mode → one remediation attempt. A backend failure is
//!   `FixFailed`; a claimed success counts only once the file
//!   re-classifies as `Encrypted`.
//!
//! The engine never retries, never caches classifications, and preserves
//! the walk order in the report. Unreadable files degrade to `Plaintext`
//! with a warning; an audit is best-effort, not all-or-nothing.

use std::path::Path;

use crate::classify::{Classification, Classify};
use crate::encryptor::Encryptor;
use crate::policy::RuleSet;
use crate::report::{ComplianceReport, OutcomeKind};
use crate::walker;

pub struct ComplianceEngine<C, E> {
    classifier: C,
    encryptor: E,
    fix: bool,
}

impl<C: Classify, E: Encryptor> ComplianceEngine<C, E> {
    pub fn new(classifier: C, encryptor: E) -> Self {
        Self {
            classifier,
            encryptor,
            fix: false,
        }
    }

    /// Enable remediation of plaintext matches.
    pub fn with_fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Run one compliance pass over `root`.
    ///
    /// `rules` is `None` when no policy was found (`ConfigMissing`, no walk
    /// performed) and may be empty (`NoRules`, also no walk). Everything
    /// else walks the tree once, sequentially.
    pub fn run(&self, root: &Path, rules: Option<&RuleSet>) -> ComplianceReport {
        let Some(rules) = rules else {
            return ComplianceReport::config_missing();
        };
        if rules.is_empty() {
            return ComplianceReport::no_rules();
        }

        let mut report = ComplianceReport::new();
        for item in walker::walk(root) {
            let rel = match item {
                Ok(rel) => rel,
                Err(err) => {
                    report.warn(format!("walk: {err}"));
                    continue;
                }
            };
            if !rules.matches(&rel) {
                continue;
            }
            self.check_one(root, rel, &mut report);
        }
        report
    }

    fn check_one(&self, root: &Path, rel: String, report: &mut ComplianceReport) {
        let path = root.join(&rel);
        match self.classify_or_warn(&path, &rel, report) {
            Classification::Encrypted => report.record(rel, OutcomeKind::Ok),
            Classification::Plaintext if !self.fix => {
                report.record(rel, OutcomeKind::MissingEncryption);
            }
            Classification::Plaintext => {
                if !self.encryptor.encrypt_in_place(&path) {
                    report.record(rel, OutcomeKind::FixFailed);
                    return;
                }
                // Re-classify the mutated file before trusting the backend.
                match self.classify_or_warn(&path, &rel, report) {
                    Classification::Encrypted => report.record(rel, OutcomeKind::FixedEncryption),
                    Classification::Plaintext => report.record(rel, OutcomeKind::FixFailed),
                }
            }
        }
    }

    fn classify_or_warn(
        &self,
        path: &Path,
        rel: &str,
        report: &mut ComplianceReport,
    ) -> Classification {
        match self.classifier.classify_file(path) {
            Ok(classification) => classification,
            Err(err) => {
                report.warn(format!("could not read {rel}: {err}"));
                Classification::Plaintext
            }
        }
    }
}
