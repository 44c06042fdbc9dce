use std::path::PathBuf;

use romsift_core::ConfigError;
use romsift_dat::CatalogError;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog document could not be loaded
    #[error("Catalog error in {}: {source}", path.display())]
    Catalog {
        path: PathBuf,
        source: CatalogError,
    },

    /// Source directory could not be listed
    #[error("Cannot read {}: {source}", path.display())]
    SourceDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub(crate) fn catalog(path: impl Into<PathBuf>, source: CatalogError) -> Self {
        Self::Catalog {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn source_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceDir {
            path: path.into(),
            source,
        }
    }
}
