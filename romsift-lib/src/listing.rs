use std::fs;
use std::path::Path;

use romsift_core::util::file_stem;

/// Sorted snapshot of the file names in a source directory.
///
/// Kept in sync with renames as the reconciler applies them, so later
/// lookups see the new names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    files: Vec<String>,
}

impl Listing {
    pub fn new<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut files: Vec<String> = files.into_iter().map(Into::into).collect();
        files.sort();
        files.dedup();
        Self { files }
    }

    /// List the regular files directly inside `dir`.
    ///
    /// Names that are not valid UTF-8 are skipped with a warning.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => files.push(name),
                Err(name) => log::warn!("Skipping non-UTF-8 file name {:?}", name),
            }
        }
        Ok(Self::new(files))
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files
            .binary_search_by(|f| f.as_str().cmp(name))
            .is_ok()
    }

    /// First file (in sorted order) whose stem is exactly `stem`.
    pub fn find_by_stem(&self, stem: &str) -> Option<&str> {
        self.files
            .iter()
            .map(String::as_str)
            .find(|f| file_stem(f) == stem)
    }

    /// Replace `old` with `new`, keeping the listing sorted.
    pub fn replace(&mut self, old: &str, new: &str) {
        if let Ok(pos) = self.files.binary_search_by(|f| f.as_str().cmp(old)) {
            self.files.remove(pos);
        }
        if let Err(pos) = self.files.binary_search_by(|f| f.as_str().cmp(new)) {
            self.files.insert(pos, new.to_string());
        }
    }
}
