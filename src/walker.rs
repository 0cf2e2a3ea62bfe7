//! Candidate file discovery.
//!
//! Walks the audit root and yields file paths relative to it, with
//! forward-slash separators on every platform. Dot directories (`.git`,
//! `.terraform`, editor metadata, ...) are pruned from descent entirely, so
//! nothing under them ever becomes a candidate. Dotfiles themselves are
//! still yielded; whether they matter is the rule set's call.
//!
//! Entries come out in sorted order, so a run over an unchanged tree is
//! reproducible. An unreadable directory surfaces as an error item and the
//! walk carries on with its siblings; symlink loops are detected and
//! skipped the same way.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

fn is_pruned_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Relative forward-slash path for an entry under `root`.
fn relative_path(root: &Path, entry: &DirEntry) -> String {
    let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}

/// Lazily walk `root`, yielding candidate files or per-entry walk errors.
///
/// The iterator is finite even in the presence of symlink cycles and can be
/// recreated for another pass at any time.
pub fn walk(root: &Path) -> impl Iterator<Item = Result<String, walkdir::Error>> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned_dir(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(relative_path(root, &entry))),
            Ok(_) => None,
            Err(err) => Some(Err(err)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn files_of(root: &Path) -> Vec<String> {
        walk(root).filter_map(|item| item.ok()).collect()
    }

    #[test]
    fn test_walk_yields_relative_forward_slash_paths() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("configs/prod")).unwrap();
        fs::write(temp.path().join("configs/prod/secret.yaml"), "x").unwrap();
        fs::write(temp.path().join("top.yaml"), "x").unwrap();

        let files = files_of(temp.path());
        assert!(files.contains(&"configs/prod/secret.yaml".to_string()));
        assert!(files.contains(&"top.yaml".to_string()));
    }

    #[test]
    fn test_dot_directories_are_pruned() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git/objects")).unwrap();
        fs::write(temp.path().join(".git/objects/secret.yaml"), "x").unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/secret.yaml"), "x").unwrap();

        let files = files_of(temp.path());
        assert_eq!(files, vec!["src/secret.yaml".to_string()]);
        assert!(files.iter().all(|f| !f.contains(".git")));
    }

    #[test]
    fn test_dotfiles_are_still_candidates() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env.production"), "x").unwrap();

        let files = files_of(temp.path());
        assert_eq!(files, vec![".env.production".to_string()]);
    }

    #[test]
    fn test_directories_are_not_yielded() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("empty")).unwrap();
        fs::write(temp.path().join("file"), "x").unwrap();

        assert_eq!(files_of(temp.path()), vec!["file".to_string()]);
    }

    #[test]
    fn test_walk_order_is_stable_across_passes() {
        let temp = TempDir::new().unwrap();
        for name in ["zoo.yaml", "alpha.yaml", "mid.yaml"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }

        let first = files_of(temp.path());
        let second = files_of(temp.path());
        assert_eq!(first, second);
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/secret.yaml"), "x").unwrap();
        std::os::unix::fs::symlink(temp.path(), temp.path().join("sub/loop")).unwrap();

        let items: Vec<_> = walk(temp.path()).collect();
        let files: Vec<_> = items
            .iter()
            .filter_map(|item| item.as_ref().ok().cloned())
            .collect();
        assert!(files.contains(&"sub/secret.yaml".to_string()));
        // The loop shows up as an error item, not an endless walk.
        assert!(items.iter().any(|item| item.is_err()));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_an_error_not_an_abort() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = temp.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(temp.path().join("visible.yaml"), "x").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            // Running privileged; permission bits don't bite.
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let items: Vec<_> = walk(temp.path()).collect();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let files: Vec<_> = items
            .iter()
            .filter_map(|item| item.as_ref().ok().cloned())
            .collect();
        assert!(files.contains(&"visible.yaml".to_string()));
        assert!(items.iter().any(|item| item.is_err()));
    }
}
