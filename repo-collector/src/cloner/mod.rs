//! Repository checkout.
//!
//! The [`Cloner`] trait is the boundary to the checkout mechanism; the
//! production implementation is [`GitCloner`], which shells out to `git`.

mod error;
mod extract;

pub use error::CloneError;

use crate::search::RepoRef;
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Checks out one repository. Implementations must be shareable across the
/// pool's workers.
#[async_trait]
pub trait Cloner: Send + Sync {
    /// Clones `repo` to its destination.
    ///
    /// # Errors
    ///
    /// Returns a [`CloneError`] on failure; the caller treats this as a
    /// per-item failure, not a run failure.
    async fn clone_repo(&self, repo: &RepoRef) -> Result<(), CloneError>;
}

/// Clones repositories with the `git` CLI.
pub struct GitCloner {
    dest: PathBuf,
    extract: Option<Regex>,
    deep: bool,
    ssh: bool,
}

impl GitCloner {
    /// Creates a cloner writing checkouts under `dest/owner/name`.
    ///
    /// With `extract` set, only files whose repository-relative path matches
    /// survive the checkout. `deep` disables the default shallow clone and
    /// `ssh` switches the transport from HTTPS to SSH.
    #[must_use]
    pub fn new(dest: PathBuf, extract: Option<Regex>, deep: bool, ssh: bool) -> Self {
        Self {
            dest,
            extract,
            deep,
            ssh,
        }
    }

    fn clone_url(&self, slug: &str) -> String {
        if self.ssh {
            format!("git@github.com:{slug}.git")
        } else {
            format!("https://github.com/{slug}.git")
        }
    }
}

#[async_trait]
impl Cloner for GitCloner {
    async fn clone_repo(&self, repo: &RepoRef) -> Result<(), CloneError> {
        let slug = repo.slug();
        let dir = self.dest.join(&repo.owner).join(&repo.name);

        if dir.exists() {
            info!(repo = %slug, dir = %dir.display(), "directory already exists, skipped");
            return Ok(());
        }
        tokio::fs::create_dir_all(self.dest.join(&repo.owner)).await?;

        info!(repo = %slug, "cloning");
        let mut cmd = Command::new("git");
        cmd.arg("clone");
        if !self.deep {
            cmd.args(["--depth", "1", "--single-branch"]);
        }
        cmd.arg(self.clone_url(&slug))
            .arg(&dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(CloneError::Git {
                slug,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        if let Some(pattern) = &self.extract {
            let kept = extract::extract_files(&dir, pattern)
                .map_err(|source| CloneError::Extract { slug: slug.clone(), source })?;
            debug!(repo = %slug, kept, "extracted matching files");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloner(ssh: bool) -> GitCloner {
        GitCloner::new(PathBuf::from("repos"), None, false, ssh)
    }

    #[test]
    fn https_clone_url() {
        assert_eq!(
            cloner(false).clone_url("rust-lang/cargo"),
            "https://github.com/rust-lang/cargo.git"
        );
    }

    #[test]
    fn ssh_clone_url() {
        assert_eq!(
            cloner(true).clone_url("rust-lang/cargo"),
            "git@github.com:rust-lang/cargo.git"
        );
    }

    #[tokio::test]
    async fn existing_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let repo = RepoRef {
            owner: "owner".to_string(),
            name: "repo".to_string(),
            description: None,
        };
        std::fs::create_dir_all(dir.path().join("owner/repo")).unwrap();

        let cloner = GitCloner::new(dir.path().to_path_buf(), None, false, false);
        // No git invocation happens, so this succeeds without a network.
        cloner.clone_repo(&repo).await.unwrap();
    }
}
