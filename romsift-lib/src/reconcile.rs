//! Matching of catalog clones to files in a source directory.
//!
//! Each catalog entry is processed in order. Its clone names are looked up
//! in the directory listing, fixing letter case and re-matching renamed
//! releases through the substitution table. Anything still unmatched is
//! offered to a [`Disambiguator`]. Found files are collected into merge
//! groups keyed by the entry's canonical name.

use std::collections::HashSet;

use romsift_core::util::{file_stem, is_zip_name, split_extension};
use romsift_core::{EngineConfig, Substitution};
use romsift_dat::CatalogEntry;
use serde::Serialize;

use crate::conflict::{self, ConflictOutcome};
use crate::error::ReconcileError;
use crate::listing::Listing;
use crate::merge::{GroupRename, MergeKey, MergeMap};
use crate::naming;
use crate::ops::{FileOps, RenameInstruction, RenameReason};
use crate::prompt::{Ambiguity, Decision, Disambiguator};

/// Options controlling reconciliation behavior.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Ask the [`Disambiguator`] about clones with no automatic match. When
    /// off, such clones are recorded as [`ReconcileError::AmbiguousMatch`]
    /// failures instead.
    pub allow_interruptions: bool,
}

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub enum ReconcileProgress {
    /// Starting a catalog
    Starting { entries: usize },
    /// Processing one catalog entry
    Entry {
        index: usize,
        total: usize,
        name: String,
    },
    /// Finished all entries
    Done,
}

/// A clone that could not be matched, and why.
#[derive(Debug)]
pub struct ReconcileFailure {
    pub clone: String,
    pub error: ReconcileError,
}

/// Result of processing a single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryReport {
    /// Key the entry's files were merged under
    pub key: MergeKey,
    /// Conflict with an earlier entry, if any
    pub conflict: Option<ConflictOutcome>,
    pub found: usize,
    pub missing: usize,
}

impl EntryReport {
    /// Every clone of the entry has a file.
    pub fn fully_matched(&self) -> bool {
        self.missing == 0
    }
}

/// Everything a reconciliation run produced.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub groups: MergeMap,
    /// Renames that were applied, in order
    pub renames: Vec<RenameInstruction>,
    pub group_renames: Vec<GroupRename>,
    /// Clone names that have a file
    pub merged: Vec<String>,
    /// Clone names with no file
    pub unmerged: Vec<String>,
    pub failures: Vec<ReconcileFailure>,
}

impl ReconcileOutcome {
    /// Summary of the collection for a romset log.
    pub fn summary(&self, system: impl Into<String>) -> RomsetSummary {
        let mut merged = self.merged.clone();
        let mut unmerged = self.unmerged.clone();
        merged.sort();
        merged.dedup();
        unmerged.sort();
        unmerged.dedup();
        RomsetSummary {
            system: system.into(),
            merged,
            unmerged,
        }
    }
}

/// Which known releases a collection contains, sorted by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomsetSummary {
    pub system: String,
    pub merged: Vec<String>,
    pub unmerged: Vec<String>,
}

impl RomsetSummary {
    /// Number of releases the catalog knows about.
    pub fn known(&self) -> usize {
        self.merged.len() + self.unmerged.len()
    }

    /// Number of releases present in the collection.
    pub fn contained(&self) -> usize {
        self.merged.len()
    }
}

/// Index of the first candidate that turns into `clone` under some
/// substitution, applied in either direction.
///
/// `&amp;` is read as `&` on both sides. Candidates are tried in order and
/// each is checked against the whole table before moving on.
pub fn guess_old_name<S: AsRef<str>>(
    candidates: &[S],
    clone: &str,
    substitutions: &[Substitution],
) -> Option<usize> {
    let clone = clone.replace("&amp;", "&");
    candidates.iter().position(|candidate| {
        let stem = file_stem(candidate.as_ref()).replace("&amp;", "&");
        substitutions.iter().any(|sub| {
            stem.replace(&sub.from, &sub.to) == clone || stem.replace(&sub.to, &sub.from) == clone
        })
    })
}

/// Stateful matcher for one source directory.
pub struct Reconciler<'a> {
    config: &'a EngineConfig,
    listing: Listing,
    ops: &'a mut dyn FileOps,
    prompt: &'a mut dyn Disambiguator,
    options: ReconcileOptions,
    skip_all: bool,
    matched_clones: HashSet<String>,
    outcome: ReconcileOutcome,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        config: &'a EngineConfig,
        listing: Listing,
        ops: &'a mut dyn FileOps,
        prompt: &'a mut dyn Disambiguator,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            config,
            listing,
            ops,
            prompt,
            options,
            skip_all: false,
            matched_clones: HashSet::new(),
            outcome: ReconcileOutcome::default(),
        }
    }

    /// Current view of the directory, including applied renames.
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn groups(&self) -> &MergeMap {
        &self.outcome.groups
    }

    /// Match the clones of one catalog entry. `index` identifies the entry
    /// and must be unique within a run.
    pub fn process_entry(&mut self, index: usize, entry: &CatalogEntry) -> EntryReport {
        let clones = entry.distinct_clones();
        self.fix_case(&clones);

        let resolution = naming::resolve(entry, self.config);
        let mut key = MergeKey::new(resolution.canonical_name, resolution.region_rank);
        let conflict = self.resolve_name_conflict(&mut key, index, &clones);

        let mut found = 0;
        let mut missing = 0;
        for clone in &clones {
            match self.locate(clone, &clones) {
                Some(file) => {
                    found += 1;
                    self.matched_clones.insert(clone.to_string());
                    self.outcome.merged.push(clone.to_string());
                    if !self
                        .outcome
                        .groups
                        .add_member(&key, file.as_str(), entry.category, index)
                    {
                        log::debug!("{file} already belongs to another group");
                    }
                }
                None => {
                    missing += 1;
                    self.outcome.unmerged.push(clone.to_string());
                }
            }
        }

        EntryReport {
            key,
            conflict,
            found,
            missing,
        }
    }

    /// Consume the reconciler and return everything it produced.
    pub fn finish(self) -> ReconcileOutcome {
        self.outcome
    }

    /// Rename files whose name differs from a clone only by letter case.
    fn fix_case(&mut self, clones: &[&str]) {
        let files: Vec<String> = self.listing.files().to_vec();
        for file in files {
            if self.outcome.groups.contains_file(&file) {
                continue;
            }
            let (stem, ext) = split_extension(&file);
            let Some(clone) = clones
                .iter()
                .find(|c| **c != stem && c.to_lowercase() == stem.to_lowercase())
            else {
                continue;
            };
            let target = format!("{clone}{ext}");
            if self.listing.contains(&target) {
                log::warn!("Not fixing case of {file}: {target} already exists");
                continue;
            }
            let instruction = RenameInstruction {
                is_archive: is_zip_name(&file),
                old: file.clone(),
                new: target,
                reason: RenameReason::CaseFix,
            };
            self.apply(instruction, clone);
        }
    }

    /// Check the entry's canonical name against groups from earlier
    /// entries, re-keying whichever side needs a region qualifier.
    fn resolve_name_conflict(
        &mut self,
        key: &mut MergeKey,
        index: usize,
        clones: &[&str],
    ) -> Option<ConflictOutcome> {
        let existing_key = self.outcome.groups.find_conflict(&key.canonical_name, index)?;
        let existing_names: Vec<String> = self
            .outcome
            .groups
            .get(&existing_key)
            .map(|g| g.members.iter().map(|m| file_stem(m).to_string()).collect())
            .unwrap_or_default();

        let outcome = conflict::resolve_conflict(
            &key.canonical_name,
            &existing_names,
            clones,
            &self.config.naming,
        );
        log::debug!("Name conflict on \"{}\": {:?}", key.canonical_name, outcome);

        if let Some(new_name) = outcome.existing_name() {
            if let Some(rename) = self.outcome.groups.rekey(&existing_key, new_name) {
                self.outcome.group_renames.push(rename);
            }
        }
        key.canonical_name = outcome.incoming_name(&key.canonical_name).to_string();
        Some(outcome)
    }

    /// Find (renaming if necessary) the file for a clone.
    fn locate(&mut self, clone: &str, clones: &[&str]) -> Option<String> {
        if let Some(file) = self.listing.find_by_stem(clone) {
            return Some(file.to_string());
        }

        let title = clone.split('(').next().unwrap_or(clone);
        let prefix = format!("{title}(");
        let candidates: Vec<String> = self
            .listing
            .files()
            .iter()
            .filter(|f| f.starts_with(&prefix))
            .filter(|f| self.unavailable(f, clones).is_none())
            .cloned()
            .collect();

        let bad_dump = format!("{clone} [b].zip");
        if candidates.contains(&bad_dump) {
            log::info!("Skipping bad dump {bad_dump}");
            return None;
        }

        let (source, reason) =
            match guess_old_name(&candidates, clone, &self.config.substitutions) {
                Some(i) => (candidates[i].clone(), RenameReason::Substitution),
                None => (self.escalate(clone, clones, &candidates)?, RenameReason::Chosen),
            };

        if !self.listing.contains(&source) {
            self.outcome.failures.push(ReconcileFailure {
                clone: clone.to_string(),
                error: ReconcileError::ambiguous(clone, format!("\"{source}\" does not exist")),
            });
            return None;
        }

        let (_, ext) = split_extension(&source);
        let target = format!("{clone}{ext}");
        let instruction = RenameInstruction {
            is_archive: is_zip_name(&source),
            old: source,
            new: target.clone(),
            reason,
        };
        self.apply(instruction, clone).then_some(target)
    }

    /// Ask for a decision on a clone with no automatic match.
    fn escalate(&mut self, clone: &str, clones: &[&str], candidates: &[String]) -> Option<String> {
        if self.skip_all {
            return None;
        }
        if !self.options.allow_interruptions {
            // With nothing to choose from the clone is simply missing
            if !candidates.is_empty() {
                self.outcome.failures.push(ReconcileFailure {
                    clone: clone.to_string(),
                    error: ReconcileError::ambiguous(
                        clone,
                        format!("no automatic match among {} candidates", candidates.len()),
                    ),
                });
            }
            return None;
        }

        let ambiguity = Ambiguity {
            missing: clone,
            clones,
            candidates,
        };
        match self.prompt.choose(&ambiguity) {
            Decision::Candidate(i) => match candidates.get(i) {
                Some(file) => Some(file.clone()),
                None => {
                    self.outcome.failures.push(ReconcileFailure {
                        clone: clone.to_string(),
                        error: ReconcileError::ambiguous(
                            clone,
                            format!("candidate {i} out of range"),
                        ),
                    });
                    None
                }
            },
            Decision::Literal(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let name = if split_extension(name).1.is_empty() {
                    format!("{name}.zip")
                } else {
                    name.to_string()
                };
                if let Some(reason) = self.unavailable(&name, clones) {
                    self.outcome.failures.push(ReconcileFailure {
                        clone: clone.to_string(),
                        error: ReconcileError::ambiguous(clone, format!("\"{name}\" {reason}")),
                    });
                    return None;
                }
                Some(name)
            }
            Decision::Skip => None,
            Decision::SkipAll => {
                self.skip_all = true;
                None
            }
        }
    }

    /// Why `file` cannot be renamed to a missing clone, if it cannot.
    fn unavailable(&self, file: &str, clones: &[&str]) -> Option<&'static str> {
        let stem = file_stem(file);
        if self.outcome.groups.contains_file(file) {
            Some("already belongs to a game")
        } else if clones.contains(&stem) {
            Some("is another release of this game")
        } else if self.matched_clones.contains(stem) {
            Some("already matches a release")
        } else {
            None
        }
    }

    /// Apply a rename, keeping the listing in sync. Failures are recorded
    /// against `clone`.
    fn apply(&mut self, instruction: RenameInstruction, clone: &str) -> bool {
        match self.ops.apply(&instruction) {
            Ok(()) => {
                log::debug!("Renamed {} -> {}", instruction.old, instruction.new);
                self.listing.replace(&instruction.old, &instruction.new);
                self.outcome.renames.push(instruction);
                true
            }
            Err(error) => {
                log::debug!("Rename failed: {error}");
                self.outcome.failures.push(ReconcileFailure {
                    clone: clone.to_string(),
                    error,
                });
                false
            }
        }
    }
}

/// Reconcile every entry of a catalog against a directory listing.
pub fn reconcile_catalog(
    entries: &[CatalogEntry],
    config: &EngineConfig,
    listing: Listing,
    ops: &mut dyn FileOps,
    prompt: &mut dyn Disambiguator,
    options: ReconcileOptions,
    progress: &dyn Fn(ReconcileProgress),
) -> ReconcileOutcome {
    progress(ReconcileProgress::Starting {
        entries: entries.len(),
    });

    let mut reconciler = Reconciler::new(config, listing, ops, prompt, options);
    for (index, entry) in entries.iter().enumerate() {
        progress(ReconcileProgress::Entry {
            index,
            total: entries.len(),
            name: entry.clones.first().cloned().unwrap_or_default(),
        });
        let report = reconciler.process_entry(index, entry);
        if !report.fully_matched() {
            log::debug!(
                "{}: {} of {} clones found",
                report.key.canonical_name,
                report.found,
                report.found + report.missing
            );
        }
    }

    progress(ReconcileProgress::Done);
    reconciler.finish()
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
