//! Clone error types.

use thiserror::Error;

/// Errors that can occur while cloning a single repository.
///
/// These are per-item failures: the pool logs them and moves on.
#[derive(Debug, Error)]
pub enum CloneError {
    /// Destination setup or the git process itself failed at the OS level.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// git exited with a non-zero status.
    #[error("git clone failed for {slug}: {stderr}")]
    Git { slug: String, stderr: String },

    /// Post-clone file extraction failed.
    #[error("file extraction failed for {slug}: {source}")]
    Extract {
        slug: String,
        source: std::io::Error,
    },
}
