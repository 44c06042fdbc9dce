//! The romsift reconciliation engine: canonical naming, conflict handling,
//! matching of catalog clones to files on disk, and 1G1R selection.

pub mod archive;
pub mod conflict;
pub mod error;
pub mod listing;
pub mod merge;
pub mod naming;
pub mod ops;
pub mod prompt;
pub mod reconcile;
pub mod select;

pub use conflict::{ConflictOutcome, matching_region, resolve_conflict};
pub use error::ReconcileError;
pub use listing::Listing;
pub use merge::{GroupRename, MergeGroup, MergeKey, MergeMap};
pub use naming::{Resolution, canonical_name, resolve};
pub use ops::{DiskOps, FileOps, PlanOps, RenameInstruction, RenameReason};
pub use prompt::{Ambiguity, Decision, Disambiguator, NeverAsk};
pub use reconcile::{
    EntryReport, ReconcileFailure, ReconcileOptions, ReconcileOutcome, ReconcileProgress,
    Reconciler, RomsetSummary, guess_old_name, reconcile_catalog,
};
pub use select::{Selection, VariantScore, score_variant, select_all, select_best};
