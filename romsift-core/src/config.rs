//! Engine configuration: region priorities, naming rules, the substitution
//! table used to re-match misnamed files, and the variant scoring markers.
//!
//! All tables are plain data passed explicitly to the components that need
//! them. [`EngineConfig::default`] reproduces the stock tables; a TOML file at
//! `~/.config/romsift/settings.toml` (or a path given on the command line) can
//! override any of them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rank given to region tokens that are not in the table.
pub const UNKNOWN_RANK: u32 = 99;

/// Canonical path to the settings file: `~/.config/romsift/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romsift").join("settings.toml")
}

/// Every table the reconciliation engine consults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub regions: RegionTable,
    pub naming: NamingRules,
    /// Attribute substitutions tried in both directions when guessing the
    /// old name of a renamed release.
    pub substitutions: Vec<Substitution>,
    pub scoring: ScoringRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regions: RegionTable::default(),
            naming: NamingRules::default(),
            substitutions: Substitution::default_table(),
            scoring: ScoringRules::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration file. Tables missing from the file keep their
    /// defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Resolve the configuration using a priority chain:
    ///
    /// 1. Explicit path (must exist)
    /// 2. `settings.toml` in the user config directory, if present
    /// 3. Built-in defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = settings_path();
        if default_path.is_file() {
            log::debug!("Loading settings from {}", default_path.display());
            return Self::load(&default_path);
        }
        Ok(Self::default())
    }

    /// Serialize to pretty TOML, e.g. for `config show`.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Region priorities.
///
/// `ranks` maps a region token to its preference (lower is better) and is
/// used to pick the representative release of a game. `priority` is an
/// ordered list of region and language tokens; it marks where the region
/// block of a display name ends and orders files for 1G1R selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionTable {
    pub ranks: BTreeMap<String, u32>,
    pub priority: Vec<String>,
}

impl Default for RegionTable {
    fn default() -> Self {
        let ranks = [
            ("World", 0),
            ("U", 0),
            ("USA", 0),
            ("En", 1),
            ("E", 2),
            ("Europe", 2),
            ("A", 3),
            ("Australia", 3),
            ("Ca", 4),
            ("Canada", 4),
            ("J", 5),
            ("Japan", 5),
            ("Ja", 5),
            ("F", 6),
            ("France", 6),
            ("Fr", 6),
            ("G", 7),
            ("Germany", 7),
            ("De", 7),
            ("S", 8),
            ("Spain", 8),
            ("Es", 8),
            ("I", 9),
            ("Italy", 9),
            ("It", 9),
            ("Norway", 10),
            ("Br", 11),
            ("Brazil", 11),
            ("Sw", 12),
            ("Sweden", 12),
            ("Cn", 13),
            ("China", 13),
            ("Zh", 13),
            ("K", 14),
            ("Korea", 14),
            ("Ko", 14),
            ("As", 15),
            ("Asia", 15),
            ("Ne", 16),
            ("Netherlands", 16),
            ("Ru", 17),
            ("Russia", 17),
            ("Denmark", 18),
            ("Nl", 19),
            ("Pt", 20),
            ("Sv", 21),
            ("No", 22),
            ("Da", 23),
            ("Fi", 24),
            ("Pl", 25),
        ];

        let priority = [
            "World",
            "USA",
            "En",
            "Europe",
            "Australia",
            "Canada",
            "Japan",
            "Ja",
            "France",
            "Fr",
            "Germany",
            "De",
            "Spain",
            "Es",
            "Italy",
            "It",
            "Norway",
            "Brazil",
            "Sweden",
            "China",
            "Zh",
            "Korea",
            "Ko",
            "Asia",
            "Netherlands",
            "Russia",
            "Ru",
            "Denmark",
            "Nl",
            "Pt",
            "Sv",
            "No",
            "Da",
            "Fi",
            "Pl",
            "Unknown",
        ];

        Self {
            ranks: ranks
                .into_iter()
                .map(|(token, rank)| (token.to_string(), rank))
                .collect(),
            priority: priority.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Rules for deriving canonical display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingRules {
    /// Attributes starting with any of these never become a name suffix.
    pub skipped_prefixes: Vec<String>,
    /// Names containing this marker denote shared system files and are
    /// always merged on conflict.
    pub shared_marker: String,
}

impl Default for NamingRules {
    fn default() -> Self {
        let skipped = [
            "Rev",
            "Beta",
            "Virtual Console",
            "Proto",
            "Unl",
            "v",
            "Switch Online",
            "GB Compatible",
            "SGB Enhanced",
            "Demo",
            "Disc",
            "Promo",
            "Sample",
            "DLC",
            "WiiWare",
            "GameCube",
            "Minis",
            "Promotion Card",
            "Namcot Collection",
            "Namco Museum Archives",
            "Club Nintendo",
            "Aftermarket",
            "Test Program",
            "Competition Cart",
            "NES Test",
        ];
        Self {
            skipped_prefixes: skipped.into_iter().map(str::to_string).collect(),
            shared_marker: "[BIOS]".to_string(),
        }
    }
}

/// One entry of the substitution table, e.g. `(Rev A)` ↔ `(Rev 1)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    pub from: String,
    pub to: String,
}

impl Substitution {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// The stock table: lettered revisions, betas and prototypes map to
    /// numbered ones, reprints, and multi-region tags collapse to `(USA)`.
    pub fn default_table() -> Vec<Self> {
        let mut table = Vec::new();
        for kind in ["Rev", "Beta", "Proto"] {
            for (letter, number) in ('A'..='F').zip(1..=6) {
                table.push(Self::new(
                    format!("({kind} {letter})"),
                    format!("({kind} {number})"),
                ));
            }
        }
        table.push(Self::new("(Rev A)", "(Reprint)"));
        table.push(Self::new("(Rev 1)", "(Reprint)"));
        table.push(Self::new("(USA, Australia)", "(USA)"));
        table.push(Self::new("(USA, Europe)", "(USA)"));
        table
    }
}

/// Markers and weights for picking the best file of a merge group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    pub base_score: i32,
    /// Prefix of revision attributes such as `Rev 1`.
    pub revision_prefix: String,
    pub revision_bonus: i32,
    /// Prefix of version attributes such as `v1.1`; a digit must follow.
    pub version_prefix: String,
    pub version_bonus: i32,
    pub prerelease_markers: Vec<String>,
    pub prerelease_penalty: i32,
    pub legacy_markers: Vec<String>,
    pub legacy_penalty: i32,
    pub sample_markers: Vec<String>,
    pub sample_penalty: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            base_score: 100,
            revision_prefix: "Rev".to_string(),
            revision_bonus: 30,
            version_prefix: "v".to_string(),
            version_bonus: 30,
            prerelease_markers: vec!["Beta".to_string(), "Proto".to_string()],
            prerelease_penalty: 50,
            legacy_markers: vec![
                "Virtual Console".to_string(),
                "GameCube".to_string(),
                "Collection".to_string(),
            ],
            legacy_penalty: 10,
            sample_markers: vec!["Sample".to_string(), "Demo".to_string(), "Promo".to_string()],
            sample_penalty: 90,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
