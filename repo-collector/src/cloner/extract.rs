//! Post-clone file extraction.
//!
//! Reduces a checkout to the files whose repository-relative path matches
//! a pattern. The `.git` directory is always removed, and directories left
//! empty by the sweep are pruned.

use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;

/// Deletes everything under `root` except files matching `pattern`.
///
/// Returns the number of files kept.
pub(crate) fn extract_files(root: &Path, pattern: &Regex) -> io::Result<usize> {
    let git_dir = root.join(".git");
    if git_dir.is_dir() {
        fs::remove_dir_all(&git_dir)?;
    }

    let mut kept = 0;
    sweep(root, root, pattern, &mut kept)?;
    Ok(kept)
}

/// Walks `dir`, removing non-matching files. Returns whether `dir` ended up
/// empty so the caller can prune it.
fn sweep(root: &Path, dir: &Path, pattern: &Regex, kept: &mut usize) -> io::Result<bool> {
    let mut empty = true;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type()?.is_dir() {
            if sweep(root, &path, pattern, kept)? {
                fs::remove_dir(&path)?;
            } else {
                empty = false;
            }
        } else {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if pattern.is_match(&relative.to_string_lossy()) {
                *kept += 1;
                empty = false;
            } else {
                fs::remove_file(&path)?;
            }
        }
    }

    Ok(empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(path).unwrap();
    }

    #[test]
    fn keeps_matching_files_and_prunes_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("src/main.rs"));
        touch(&root.join("src/util.py"));
        touch(&root.join("docs/guide.md"));
        touch(&root.join("README.md"));

        let kept = extract_files(root, &Regex::new(r"\.md$").unwrap()).unwrap();

        assert_eq!(kept, 2);
        assert!(root.join("docs/guide.md").exists());
        assert!(root.join("README.md").exists());
        // src/ lost both files and was pruned entirely.
        assert!(!root.join("src").exists());
    }

    #[test]
    fn removes_git_directory_even_when_it_matches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join(".git/config"));
        touch(&root.join("kept.txt"));

        extract_files(root, &Regex::new(r".*").unwrap()).unwrap();

        assert!(!root.join(".git").exists());
        assert!(root.join("kept.txt").exists());
    }

    #[test]
    fn matches_against_repo_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("vendor/lib.rs"));
        touch(&root.join("lib.rs"));

        let kept = extract_files(root, &Regex::new(r"^vendor/").unwrap()).unwrap();

        assert_eq!(kept, 1);
        assert!(root.join("vendor/lib.rs").exists());
        assert!(!root.join("lib.rs").exists());
    }
}
