use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romsift_lib::{
    NeverAsk, PlanOps, ReconcileOptions, ReconcileProgress, reconcile_catalog, select_all,
};

use crate::error::CliError;

/// Print the best file of every game without touching the directory.
///
/// Reconciliation runs against a [`PlanOps`], so files that a scan would
/// rename are reported under their corrected names.
pub(crate) fn run_select(
    dat: &Path,
    dir: &Path,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let (config, catalog, listing) = super::load_sources(dat, dir, config_path)?;

    let mut plan = PlanOps::default();
    let mut prompt = NeverAsk;
    let outcome = reconcile_catalog(
        &catalog.entries,
        &config,
        listing,
        &mut plan,
        &mut prompt,
        ReconcileOptions::default(),
        &|_: ReconcileProgress| {},
    );

    let selections = select_all(&outcome.groups, &config);

    let problems = super::failure_lines(&outcome.failures);

    if json {
        // Keep stdout pure JSON
        for line in &problems {
            eprintln!("{line}");
        }
        println!("{}", serde_json::to_string_pretty(&selections)?);
        return Ok(());
    }

    for line in &problems {
        log::warn!("{line}");
    }

    if !plan.planned.is_empty() {
        log::info!(
            "{}",
            format!(
                "{} files would be renamed by a scan; showing their new names",
                plan.planned.len()
            )
            .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    for selection in &selections {
        log::info!(
            "  {} {} {}",
            selection.canonical_name.if_supports_color(Stdout, |t| t.bold()),
            "\u{2192}".if_supports_color(Stdout, |t| t.dimmed()),
            selection.file.if_supports_color(Stdout, |t| t.cyan()),
        );
        if selection.members > 1 {
            log::debug!(
                "    {} of {} files, {}",
                "chosen".if_supports_color(Stdout, |t| t.dimmed()),
                selection.members,
                selection.category,
            );
        }
    }

    log::info!("");
    log::info!(
        "{} games selected",
        selections.len().if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
