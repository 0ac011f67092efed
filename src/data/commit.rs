//! Commit input type consumed by the lint engine.

use serde::{Deserialize, Serialize};

/// A commit as supplied by the version-control collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Opaque commit identifier.
    pub hash: String,
    /// Raw message text, exactly as stored.
    pub message: String,
    /// Branch the commit is checked against; empty when not applicable.
    #[serde(default)]
    pub branch: String,
}

impl RawCommit {
    /// Creates a commit record.
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
            branch: branch.into(),
        }
    }

    /// Returns the first line of the message.
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
