//! Renaming of single-entry zip archives together with their inner file.
//!
//! Each rename works in its own scratch directory next to the archive:
//!
//! ```text
//! Game (Rev A).zip ─extract─▶ .romsift-repackXXXX/extract/Game (Rev 1).sfc
//!                             .romsift-repackXXXX/pack/Game (Rev 1).zip ◀─pack─┘
//! Game (Rev A).zip ─move─▶ .romsift-repackXXXX/backup.zip
//! .romsift-repackXXXX/pack/Game (Rev 1).zip ─move─▶ Game (Rev 1).zip
//! ```
//!
//! If the new archive cannot be moved into place the backup is moved back,
//! so the original survives any failure.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use romsift_core::util::split_extension;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ReconcileError;

const SCRATCH_PREFIX: &str = ".romsift-repack";

/// Number of entries in a zip archive.
pub fn entry_count(path: &Path) -> Result<usize, ReconcileError> {
    Ok(open_archive(path)?.len())
}

/// Rename the archive at `old` to `new` and rename its single inner entry
/// to the stem of `new`, keeping the inner extension.
///
/// Archives with more than one entry are rejected with
/// [`ReconcileError::ArchiveStructure`] and left untouched.
pub fn repack_renamed(old: &Path, new: &Path) -> Result<(), ReconcileError> {
    let new_file_name = new
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ReconcileError::archive(new, "target has no usable file name"))?;
    let (new_stem, _) = split_extension(new_file_name);

    if new.exists() && !same_name_ignoring_case(old, new) {
        return Err(ReconcileError::filesystem(
            new,
            io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"),
        ));
    }

    let mut archive = open_archive(old)?;
    if archive.len() != 1 {
        return Err(ReconcileError::archive(
            old,
            format!("expected exactly one entry, found {}", archive.len()),
        ));
    }

    let parent = old.parent().unwrap_or(Path::new("."));
    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| ReconcileError::filesystem(parent, e))?;

    let staged = stage(&mut archive, old, scratch.path(), new_stem, new_file_name)?;
    drop(archive);

    swap(old, new, &staged, scratch)
}

/// Extract the single entry under its new name and pack it into a fresh
/// archive inside `scratch`. Returns the path of the new archive.
fn stage(
    archive: &mut ZipArchive<File>,
    old: &Path,
    scratch: &Path,
    new_stem: &str,
    new_file_name: &str,
) -> Result<PathBuf, ReconcileError> {
    let mut entry = archive
        .by_index(0)
        .map_err(|e| ReconcileError::archive(old, format!("unreadable entry: {e}")))?;
    if entry.is_dir() {
        return Err(ReconcileError::archive(old, "single entry is a directory"));
    }

    let inner_name = entry
        .enclosed_name()
        .and_then(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .ok_or_else(|| ReconcileError::archive(old, "entry has an unsafe name"))?;
    let (_, inner_ext) = split_extension(&inner_name);
    let renamed_inner = format!("{new_stem}{inner_ext}");

    // Separate directories: the inner file may share the archive's name
    let extract_dir = scratch.join("extract");
    let pack_dir = scratch.join("pack");
    for dir in [&extract_dir, &pack_dir] {
        fs::create_dir(dir).map_err(|e| ReconcileError::filesystem(dir, e))?;
    }

    let extracted = extract_dir.join(&renamed_inner);
    let mut out = File::create(&extracted).map_err(|e| ReconcileError::filesystem(&extracted, e))?;
    io::copy(&mut entry, &mut out).map_err(|e| ReconcileError::filesystem(&extracted, e))?;
    drop(out);

    let staged_zip = pack_dir.join(new_file_name);
    let zip_file =
        File::create(&staged_zip).map_err(|e| ReconcileError::filesystem(&staged_zip, e))?;
    let mut writer = ZipWriter::new(zip_file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    writer
        .start_file(renamed_inner.clone(), options)
        .map_err(|e| ReconcileError::archive(&staged_zip, e.to_string()))?;
    let mut input = File::open(&extracted).map_err(|e| ReconcileError::filesystem(&extracted, e))?;
    io::copy(&mut input, &mut writer).map_err(|e| ReconcileError::filesystem(&staged_zip, e))?;
    writer
        .finish()
        .map_err(|e| ReconcileError::archive(&staged_zip, e.to_string()))?;

    Ok(staged_zip)
}

/// Move the original aside, move the staged archive into place, and put the
/// original back if that fails. The scratch directory is removed on success.
fn swap(old: &Path, new: &Path, staged: &Path, scratch: TempDir) -> Result<(), ReconcileError> {
    let backup = scratch.path().join("backup.zip");
    fs::rename(old, &backup).map_err(|e| ReconcileError::filesystem(old, e))?;

    if let Err(e) = fs::rename(staged, new) {
        if let Err(restore) = fs::rename(&backup, old) {
            let kept = scratch.into_path();
            log::warn!(
                "Could not restore {} ({restore}); original kept at {}",
                old.display(),
                kept.join("backup.zip").display()
            );
        }
        return Err(ReconcileError::filesystem(new, e));
    }

    if let Err(e) = scratch.close() {
        log::warn!("Could not remove repack scratch directory: {e}");
    }
    Ok(())
}

fn open_archive(path: &Path) -> Result<ZipArchive<File>, ReconcileError> {
    let file = File::open(path).map_err(|e| ReconcileError::filesystem(path, e))?;
    ZipArchive::new(file)
        .map_err(|e| ReconcileError::archive(path, format!("invalid or corrupt zip: {e}")))
}

fn same_name_ignoring_case(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

#[cfg(test)]
#[path = "tests/archive_tests.rs"]
mod tests;
