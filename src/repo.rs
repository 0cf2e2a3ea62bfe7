use std::path::PathBuf;

use git2::Repository;

use crate::error::Result;

/// Locate the default audit root.
///
/// Inside a git repository this is the worktree root, wherever the command
/// was launched from; outside one it is the current directory. Bare
/// repositories have no worktree and also fall back to the current
/// directory.
pub fn discover_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    match Repository::discover(&cwd) {
        Ok(repo) => Ok(repo
            .workdir()
            .map(|workdir| workdir.to_path_buf())
            .unwrap_or(cwd)),
        Err(_) => Ok(cwd),
    }
}
