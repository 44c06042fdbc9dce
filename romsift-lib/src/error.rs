use std::path::PathBuf;

use thiserror::Error;

/// Per-clone failures during reconciliation.
///
/// None of these abort a run: they are collected into
/// [`ReconcileFailure`](crate::reconcile::ReconcileFailure) records and the
/// affected clone is left unmatched.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No automatic match and no decision available (or the decision was invalid)
    #[error("No match for \"{clone}\": {reason}")]
    AmbiguousMatch { clone: String, reason: String },

    /// Archive holds more than one entry or cannot be read
    #[error("Cannot repack {}: {reason}", path.display())]
    ArchiveStructure { path: PathBuf, reason: String },

    /// Underlying rename/copy/remove failed
    #[error("Filesystem error on {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ReconcileError {
    pub fn ambiguous(clone: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AmbiguousMatch {
            clone: clone.into(),
            reason: reason.into(),
        }
    }

    pub fn archive(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArchiveStructure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Short label for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AmbiguousMatch { .. } => "ambiguous",
            Self::ArchiveStructure { .. } => "archive",
            Self::Filesystem { .. } => "filesystem",
        }
    }
}
