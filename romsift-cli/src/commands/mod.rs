pub(crate) mod config;
pub(crate) mod scan;
pub(crate) mod select;

use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romsift_core::{EngineConfig, RegionRanker};
use romsift_dat::{Catalog, parse_catalog_file};
use romsift_lib::{Listing, ReconcileFailure};

use crate::error::CliError;

/// Load settings, the catalog, and the directory listing for a run.
pub(crate) fn load_sources(
    dat: &Path,
    dir: &Path,
    config_path: Option<&Path>,
) -> Result<(EngineConfig, Catalog, Listing), CliError> {
    let config = EngineConfig::resolve(config_path)?;
    let ranker = RegionRanker::new(&config.regions);
    let catalog = parse_catalog_file(dat, &ranker).map_err(|e| CliError::catalog(dat, e))?;
    let listing = Listing::from_dir(dir).map_err(|e| CliError::source_dir(dir, e))?;

    log::info!(
        "Catalog {} {}",
        catalog.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({} games)", catalog.entries.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "Source  {} {}",
        dir.display().if_supports_color(Stdout, |t| t.cyan()),
        format!("({} files)", listing.len()).if_supports_color(Stdout, |t| t.dimmed()),
    );

    Ok((config, catalog, listing))
}

/// Warning lines for failed clones: a count header, then one line each.
/// Empty when nothing failed.
pub(crate) fn failure_lines(failures: &[ReconcileFailure]) -> Vec<String> {
    if failures.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::with_capacity(failures.len() + 1);
    lines.push(
        format!("{} problems", failures.len())
            .if_supports_color(Stdout, |t| t.yellow())
            .to_string(),
    );
    for failure in failures {
        lines.push(format!(
            "  {} [{}] {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            failure.error.kind(),
            failure.error,
        ));
    }
    lines
}
