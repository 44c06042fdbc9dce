//! Resolution of two catalog entries that derive the same canonical name.
//!
//! Each side is checked for a region shared by all of its names. A side
//! that has one gets that region appended to its name; if neither side has
//! one the groups stay merged under the original name.

use romsift_core::{NamingRules, split_attributes};

/// What to do when an incoming entry's canonical name is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictOutcome {
    /// Both entries share the name and the same group.
    Merge,
    /// The existing group moves to `existing`; the incoming entry keeps the
    /// original name.
    RenameExisting { existing: String },
    /// The incoming entry takes `incoming`; the existing group is untouched.
    RenameIncoming { incoming: String },
    /// Both sides get their own region-qualified name.
    RenameBoth { existing: String, incoming: String },
}

impl ConflictOutcome {
    /// New name for the existing group, if it has to move.
    pub fn existing_name(&self) -> Option<&str> {
        match self {
            Self::RenameExisting { existing } | Self::RenameBoth { existing, .. } => {
                Some(existing)
            }
            Self::Merge | Self::RenameIncoming { .. } => None,
        }
    }

    /// Name the incoming entry should use.
    pub fn incoming_name<'a>(&'a self, original: &'a str) -> &'a str {
        match self {
            Self::RenameIncoming { incoming } | Self::RenameBoth { incoming, .. } => incoming,
            Self::Merge | Self::RenameExisting { .. } => original,
        }
    }
}

/// The attribute right after the title if every name agrees on it.
///
/// Returns `None` for an empty list, when the first name has no attributes,
/// or when any two names disagree.
pub fn matching_region<S: AsRef<str>>(names: &[S]) -> Option<String> {
    let (first, rest) = names.split_first()?;
    let region = split_attributes(first.as_ref()).position(1)?.to_string();
    let all_agree = rest
        .iter()
        .all(|name| split_attributes(name.as_ref()).position(1) == Some(region.as_str()));
    all_agree.then_some(region)
}

/// Decide how two entries named `name` can coexist.
///
/// `existing` holds the names already merged under `name`; `incoming` holds
/// the clone names of the entry that produced the same name.
pub fn resolve_conflict<A, B>(
    name: &str,
    existing: &[A],
    incoming: &[B],
    rules: &NamingRules,
) -> ConflictOutcome
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    if !rules.shared_marker.is_empty() && name.contains(rules.shared_marker.as_str()) {
        return ConflictOutcome::Merge;
    }

    let qualify = |region: String| format!("{name} ({region})");
    match (matching_region(existing), matching_region(incoming)) {
        (None, None) => ConflictOutcome::Merge,
        (Some(first), None) => ConflictOutcome::RenameExisting {
            existing: qualify(first),
        },
        (None, Some(second)) => ConflictOutcome::RenameIncoming {
            incoming: qualify(second),
        },
        (Some(first), Some(second)) => ConflictOutcome::RenameBoth {
            existing: qualify(first),
            incoming: qualify(second),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> NamingRules {
        NamingRules::default()
    }

    #[test]
    fn test_matching_region() {
        assert_eq!(
            matching_region(&["Puzzle (USA)", "Puzzle (USA) (Rev 1)"]),
            Some("USA".to_string())
        );
        assert_eq!(matching_region(&["Puzzle (USA)", "Puzzle (Japan)"]), None);
        assert_eq!(matching_region(&["Puzzle"]), None);
        assert_eq!(matching_region::<&str>(&[]), None);
    }

    #[test]
    fn test_matching_region_flattens_groups() {
        // "(USA, Europe)" flattens, so position 1 is "USA"
        assert_eq!(
            matching_region(&["Game (USA, Europe)", "Game (USA)"]),
            Some("USA".to_string())
        );
    }

    #[test]
    fn test_rename_both() {
        let outcome = resolve_conflict(
            "Puzzle",
            &["Puzzle (USA)"],
            &["Puzzle (Japan)", "Puzzle (Japan) (Rev 1)"],
            &rules(),
        );
        assert_eq!(
            outcome,
            ConflictOutcome::RenameBoth {
                existing: "Puzzle (USA)".to_string(),
                incoming: "Puzzle (Japan)".to_string(),
            }
        );
        assert_eq!(outcome.existing_name(), Some("Puzzle (USA)"));
        assert_eq!(outcome.incoming_name("Puzzle"), "Puzzle (Japan)");
    }

    #[test]
    fn test_rename_existing_only() {
        let outcome = resolve_conflict(
            "Puzzle",
            &["Puzzle (USA)"],
            &["Puzzle (Japan)", "Puzzle (Europe)"],
            &rules(),
        );
        assert_eq!(
            outcome,
            ConflictOutcome::RenameExisting {
                existing: "Puzzle (USA)".to_string()
            }
        );
        assert_eq!(outcome.incoming_name("Puzzle"), "Puzzle");
    }

    #[test]
    fn test_rename_incoming_only() {
        let outcome = resolve_conflict(
            "Puzzle",
            &["Puzzle (USA)", "Puzzle (Europe)"],
            &["Puzzle (Japan)"],
            &rules(),
        );
        assert_eq!(outcome.existing_name(), None);
        assert_eq!(outcome.incoming_name("Puzzle"), "Puzzle (Japan)");
    }

    #[test]
    fn test_no_regions_merges() {
        let outcome = resolve_conflict(
            "Puzzle",
            &["Puzzle (USA)", "Puzzle (Europe)"],
            &["Puzzle (Japan)", "Puzzle (Korea)"],
            &rules(),
        );
        assert_eq!(outcome, ConflictOutcome::Merge);

        let empty: [&str; 0] = [];
        assert_eq!(
            resolve_conflict("Puzzle", &empty, &empty, &rules()),
            ConflictOutcome::Merge
        );
    }

    #[test]
    fn test_shared_marker_always_merges() {
        let outcome = resolve_conflict(
            "[BIOS] System",
            &["[BIOS] System (USA)"],
            &["[BIOS] System (Japan)"],
            &rules(),
        );
        assert_eq!(outcome, ConflictOutcome::Merge);
    }
}
