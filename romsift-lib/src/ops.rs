use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive;
use crate::error::ReconcileError;

/// Why a file is being renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameReason {
    /// Name matched a clone except for letter case
    CaseFix,
    /// Matched through the substitution table
    Substitution,
    /// Chosen by the user
    Chosen,
}

/// A single file rename inside the source directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameInstruction {
    /// Current file name
    pub old: String,
    /// New file name
    pub new: String,
    /// Whether the inner entry of a zip archive is renamed too
    pub is_archive: bool,
    pub reason: RenameReason,
}

/// Applies rename instructions to storage.
pub trait FileOps {
    fn apply(&mut self, instruction: &RenameInstruction) -> Result<(), ReconcileError>;
}

/// Renames files inside a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskOps {
    root: PathBuf,
}

impl DiskOps {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileOps for DiskOps {
    fn apply(&mut self, instruction: &RenameInstruction) -> Result<(), ReconcileError> {
        let source = self.root.join(&instruction.old);
        let target = self.root.join(&instruction.new);

        if instruction.is_archive {
            return archive::repack_renamed(&source, &target);
        }

        // A case-only rename sees its own source as the target on
        // case-insensitive filesystems.
        let case_only = instruction.old.to_lowercase() == instruction.new.to_lowercase();
        if target.exists() && !case_only {
            return Err(ReconcileError::filesystem(
                &target,
                io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"),
            ));
        }
        fs::rename(&source, &target).map_err(|e| ReconcileError::filesystem(&source, e))
    }
}

/// Records every instruction without touching storage (dry run).
#[derive(Debug, Clone, Default)]
pub struct PlanOps {
    pub planned: Vec<RenameInstruction>,
}

impl FileOps for PlanOps {
    fn apply(&mut self, instruction: &RenameInstruction) -> Result<(), ReconcileError> {
        log::debug!("Planned: {} -> {}", instruction.old, instruction.new);
        self.planned.push(instruction.clone());
        Ok(())
    }
}
