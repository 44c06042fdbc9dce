//! One-game-one-ROM selection: the single best file of each merge group.

use romsift_core::util::file_stem;
use romsift_core::{EngineConfig, RegionRanker, ScoringRules, split_attributes};
use romsift_dat::Category;
use serde::Serialize;

use crate::merge::MergeMap;

/// Region placement and quality score of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantScore {
    /// Position of the best region in the priority list (lower is better)
    pub zone_rank: u32,
    pub score: i32,
}

/// The chosen file of a merge group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub canonical_name: String,
    pub region_rank: u32,
    pub category: Category,
    pub file: String,
    /// Number of files in the group
    pub members: usize,
}

/// Score a file name (extension ignored).
pub fn score_variant(file_name: &str, config: &EngineConfig) -> VariantScore {
    let attributes = split_attributes(file_stem(file_name)).attributes;
    let ranker = RegionRanker::new(&config.regions);
    VariantScore {
        zone_rank: ranker.zone_rank(&attributes),
        score: quality_score(&attributes, &config.scoring),
    }
}

fn quality_score(attributes: &[String], rules: &ScoringRules) -> i32 {
    let has = |markers: &[String]| {
        attributes
            .iter()
            .any(|attr| markers.iter().any(|m| matches_marker(attr, m)))
    };

    let mut score = rules.base_score;
    if attributes
        .iter()
        .any(|attr| is_revision(attr, &rules.revision_prefix))
    {
        score += rules.revision_bonus;
    }
    if attributes
        .iter()
        .any(|attr| is_version(attr, &rules.version_prefix))
    {
        score += rules.version_bonus;
    }
    if has(&rules.prerelease_markers) {
        score -= rules.prerelease_penalty;
    }
    if has(&rules.legacy_markers) {
        score -= rules.legacy_penalty;
    }
    if has(&rules.sample_markers) {
        score -= rules.sample_penalty;
    }
    score
}

/// `attr` is `marker` itself or `marker` followed by a space and more text.
fn matches_marker(attr: &str, marker: &str) -> bool {
    match attr.strip_prefix(marker) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

/// `Rev 1`, `Rev A`: the prefix followed by a version token.
fn is_revision(attr: &str, prefix: &str) -> bool {
    attr.len() >= 3
        && attr
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(' '))
            .is_some_and(|token| !token.trim().is_empty())
}

/// `v1.1`, `v2`: the prefix directly followed by a digit.
fn is_version(attr: &str, prefix: &str) -> bool {
    !prefix.is_empty()
        && attr
            .strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
}

/// Pick the best file of a group.
///
/// Only files with the best zone rank are considered; among those the
/// highest score wins, and ties go to the first file in sorted order.
/// Returns `None` only for an empty group.
pub fn select_best<S: AsRef<str>>(members: &[S], config: &EngineConfig) -> Option<String> {
    let mut sorted: Vec<&str> = members.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let scored: Vec<(&str, VariantScore)> = sorted
        .into_iter()
        .map(|file| (file, score_variant(file, config)))
        .collect();
    let best_zone = scored.iter().map(|(_, s)| s.zone_rank).min()?;

    let mut best: Option<(&str, i32)> = None;
    for (file, score) in scored.iter().filter(|(_, s)| s.zone_rank == best_zone) {
        match best {
            Some((_, best_score)) if score.score <= best_score => {}
            _ => best = Some((*file, score.score)),
        }
    }
    best.map(|(file, _)| file.to_string())
}

/// Pick the best file of every non-empty group, in group order.
pub fn select_all(groups: &MergeMap, config: &EngineConfig) -> Vec<Selection> {
    groups
        .iter()
        .filter_map(|group| {
            let file = select_best(&group.members, config)?;
            Some(Selection {
                canonical_name: group.canonical_name.clone(),
                region_rank: group.region_rank,
                category: group.category,
                file,
                members: group.members.len(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/select_tests.rs"]
mod tests;
