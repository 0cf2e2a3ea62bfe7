//! # Encryption Classification
//!
//! This module decides whether a file's content "looks encrypted" by sops,
//! without depending on sops internals or attempting any decryption.
//!
//! ## Heuristic
//!
//! Applied in order, short-circuiting on the first hit:
//!
//! 1. Content begins with the 4-byte magic prefix of the sops binary store
//!    format → `Encrypted`. (A YAML file whose first key is `sops:` hits
//!    this check too, which is exactly the metadata block sops writes.)
//! 2. Content decodes as UTF-8 and contains an inline ciphertext token such
//!    as `ENC[AES256_GCM,data:...]` anywhere → `Encrypted`.
//! 3. Otherwise → `Plaintext`. Empty files and genuinely binary but
//!    unencrypted files land here.
//!
//! Only a bounded prefix of the file is read ([`SCAN_LIMIT`]), so large
//! files never force a full read. This is a heuristic, not a cryptographic
//! verification: it trades perfect accuracy for zero coupling to the
//! encryption tool.
//!
//! The magic bytes and token pattern are values on [`Classifier`], not
//! inlined literals. Deployments targeting a different encryption tool can
//! supply their own via [`Classifier::new`]; [`Classifier::sops`] is the
//! default.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use regex::Regex;

/// Magic prefix of the sops binary store format.
pub const SOPS_MAGIC: &[u8] = b"sops";

/// Inline ciphertext marker sops leaves in text files: an algorithm name
/// and a `data:` field inside `ENC[...]`.
pub const SOPS_ENC_TOKEN: &str = r"ENC\[[A-Za-z0-9_-]+,data:";

/// How much of a file the heuristic inspects.
pub const SCAN_LIMIT: u64 = 256 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Encrypted,
    Plaintext,
}

/// Content-sniffing classifier for one encryption tool's formats.
pub struct Classifier {
    magic: Vec<u8>,
    token: Regex,
}

impl Classifier {
    pub fn new(magic: Vec<u8>, token: Regex) -> Self {
        Self { magic, token }
    }

    /// Classifier for sops containers and inline tokens.
    pub fn sops() -> Self {
        let token = Regex::new(SOPS_ENC_TOKEN).expect("built-in token pattern compiles");
        Self::new(SOPS_MAGIC.to_vec(), token)
    }

    /// Classify raw content.
    pub fn classify(&self, content: &[u8]) -> Classification {
        if content.starts_with(&self.magic) {
            return Classification::Encrypted;
        }

        let text = match std::str::from_utf8(content) {
            Ok(text) => text,
            // A scan window can end mid-character; the valid prefix is
            // still text. Anything else is binary and falls through.
            Err(err) if err.error_len().is_none() => {
                std::str::from_utf8(&content[..err.valid_up_to()]).unwrap_or("")
            }
            Err(_) => return Classification::Plaintext,
        };

        if self.token.is_match(text) {
            Classification::Encrypted
        } else {
            Classification::Plaintext
        }
    }

    /// Classify the file at `path` from its current on-disk content.
    ///
    /// Always re-reads; classifications are never cached, so a file mutated
    /// between calls (e.g. by remediation) is re-judged from scratch.
    pub fn classify_file(&self, path: &Path) -> io::Result<Classification> {
        let file = File::open(path)?;
        let mut content = Vec::new();
        file.take(SCAN_LIMIT).read_to_end(&mut content)?;
        Ok(self.classify(&content))
    }
}

/// Classification as an injectable capability.
///
/// The engine takes this as a constructor dependency so tests can
/// substitute a fake via ordinary polymorphism.
pub trait Classify {
    fn classify_file(&self, path: &Path) -> io::Result<Classification>;
}

impl Classify for Classifier {
    fn classify_file(&self, path: &Path) -> io::Result<Classification> {
        Classifier::classify_file(self, path)
    }
}
