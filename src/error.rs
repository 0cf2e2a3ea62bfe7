use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No .sops.yaml found in {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Failed to parse .sops.yaml: {0}")]
    ConfigInvalid(#[from] serde_yaml::Error),

    #[error("Invalid path_regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, AuditError>;
