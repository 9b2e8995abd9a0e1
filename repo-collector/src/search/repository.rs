//! Matched repository identifier.

use serde::Serialize;

/// A repository matched by the search query.
#[derive(Debug, Clone, Serialize)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Repository description, if any.
    pub description: Option<String>,
}

impl RepoRef {
    /// Returns the "owner/name" slug used to form clone targets.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
