//! Pure building blocks shared by the romsift crates: release-name attribute
//! splitting, region ranking, and the engine configuration tables.

pub mod attributes;
pub mod config;
pub mod error;
pub mod region;
pub mod util;

pub use attributes::{VariantName, split_attributes};
pub use config::{
    EngineConfig, NamingRules, RegionTable, ScoringRules, Substitution, UNKNOWN_RANK,
    settings_path,
};
pub use error::ConfigError;
pub use region::RegionRanker;
