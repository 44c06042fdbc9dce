//! Canonical display names for catalog entries.
//!
//! The representative release of an entry is the variant with the best
//! region rank. Its name is cut at the region block and may keep one
//! distinguishing suffix:
//!
//! ```text
//! Game (Japan) (Special Edition) (Rev 1)  ->  Game (Special Edition)
//! Pokemon - Red Version (USA, Europe) (SGB Enhanced)  ->  Pokemon - Red Version
//! ```

use romsift_core::{EngineConfig, NamingRules, RegionRanker, UNKNOWN_RANK, split_attributes};
use romsift_dat::CatalogEntry;

/// Canonical name and region rank derived for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub region_rank: u32,
    pub canonical_name: String,
    /// Index of the variant the name was derived from.
    pub representative: usize,
}

/// Derive the canonical name and region rank of an entry.
pub fn resolve(entry: &CatalogEntry, config: &EngineConfig) -> Resolution {
    let ranker = RegionRanker::new(&config.regions);
    let (region_rank, representative) = ranker
        .best_region(entry.regions())
        .unwrap_or((UNKNOWN_RANK, 0));

    let name = entry
        .variants
        .get(representative)
        .map(|v| v.name.as_str())
        .or_else(|| entry.clones.first().map(String::as_str))
        .unwrap_or_default();

    Resolution {
        region_rank,
        canonical_name: canonical_name(name, config),
        representative,
    }
}

/// Derive the canonical display name of a single release name.
pub fn canonical_name(variant: &str, config: &EngineConfig) -> String {
    let ranker = RegionRanker::new(&config.regions);
    let split = split_attributes(variant);

    let mut name = split.base_title.clone();
    let remaining = match split
        .attributes
        .iter()
        .position(|a| ranker.is_region_token(a))
    {
        Some(pos) => {
            for attr in &split.attributes[..pos] {
                push_attribute(&mut name, attr);
            }
            &split.attributes[pos + 1..]
        }
        None => &split.attributes[..],
    };

    if let Some(suffix) = pick_suffix(remaining, &name, &ranker, &config.naming) {
        push_attribute(&mut name, suffix);
    }

    name.trim_end_matches('.').to_string()
}

fn push_attribute(name: &mut String, attr: &str) {
    name.push_str(" (");
    name.push_str(attr);
    name.push(')');
}

/// First attribute worth keeping as a distinguishing suffix.
fn pick_suffix<'a>(
    attributes: &'a [String],
    stem: &str,
    ranker: &RegionRanker<'_>,
    rules: &NamingRules,
) -> Option<&'a str> {
    attributes.iter().map(String::as_str).find(|attr| {
        !ranker.is_region_token(attr)
            && !rules
                .skipped_prefixes
                .iter()
                .any(|prefix| attr.starts_with(prefix.as_str()))
            && !attr.contains("Collection")
            && attr.matches('-').count() < 2
            && !stem.contains(&format!(" ({attr})"))
    })
}

#[cfg(test)]
#[path = "tests/naming_tests.rs"]
mod tests;
