use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romsift_lib::{
    DiskOps, Disambiguator, FileOps, NeverAsk, PlanOps, ReconcileOptions, ReconcileOutcome,
    ReconcileProgress, RenameReason, reconcile_catalog,
};

use crate::error::CliError;
use crate::prompt::ConsolePrompt;
use crate::romset_log::write_romset_log;

pub(crate) struct ScanArgs {
    pub dat: PathBuf,
    pub dir: PathBuf,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub interactive: bool,
    pub log_dir: Option<PathBuf>,
    pub system: Option<String>,
    pub quiet: bool,
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<(), CliError> {
    let (config, catalog, listing) =
        super::load_sources(&args.dat, &args.dir, args.config.as_deref())?;

    if args.dry_run {
        log::info!(
            "{}",
            "Dry run: no files will be renamed".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(catalog.entries.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("/-\\|"),
        );
        pb
    };

    let progress_callback = |progress: ReconcileProgress| match progress {
        ReconcileProgress::Starting { entries } => {
            pb.set_length(entries as u64);
            pb.set_message("Scanning");
        }
        ReconcileProgress::Entry { index, name, .. } => {
            pb.set_position(index as u64 + 1);
            pb.set_message(name);
        }
        ReconcileProgress::Done => pb.finish_and_clear(),
    };

    let mut disk;
    let mut plan;
    let ops: &mut dyn FileOps = if args.dry_run {
        plan = PlanOps::default();
        &mut plan
    } else {
        disk = DiskOps::new(&args.dir);
        &mut disk
    };

    let mut console;
    let mut silent = NeverAsk;
    let prompt: &mut dyn Disambiguator = if args.interactive {
        console = ConsolePrompt::new(pb.clone());
        &mut console
    } else {
        &mut silent
    };

    let options = ReconcileOptions {
        allow_interruptions: args.interactive,
    };
    let outcome = reconcile_catalog(
        &catalog.entries,
        &config,
        listing,
        ops,
        prompt,
        options,
        &progress_callback,
    );
    pb.finish_and_clear();

    print_outcome(&outcome, args.dry_run);

    let system = args
        .system
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| Some(catalog.name.clone()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| {
            args.dat
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "romset".to_string())
        });
    let summary = outcome.summary(system);

    log::info!("");
    log::info!(
        "{} This romset contains {} of {} known ROMs",
        summary.system.if_supports_color(Stdout, |t| t.bold()),
        summary.contained(),
        summary.known(),
    );

    if let Some(dir) = &args.log_dir {
        let path = write_romset_log(dir, &summary)?;
        log::info!(
            "  Romset log written to {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    Ok(())
}

fn print_outcome(outcome: &ReconcileOutcome, dry_run: bool) {
    let arrow = if dry_run { "would rename" } else { "renamed" };
    for rename in &outcome.renames {
        let reason = match rename.reason {
            RenameReason::CaseFix => "case",
            RenameReason::Substitution => "guess",
            RenameReason::Chosen => "chosen",
        };
        log::info!(
            "  {} {} {} {} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            rename.old,
            arrow.if_supports_color(Stdout, |t| t.dimmed()),
            rename.new.if_supports_color(Stdout, |t| t.cyan()),
            format!("({reason})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    for group in &outcome.group_renames {
        log::info!(
            "  {} \"{}\" is now \"{}\"",
            "\u{2192}".if_supports_color(Stdout, |t| t.blue()),
            group.from.canonical_name,
            group.to.canonical_name,
        );
    }

    for line in super::failure_lines(&outcome.failures) {
        log::warn!("{line}");
    }

    let merged = outcome.merged.len();
    let missing = outcome.unmerged.len();
    log::info!(
        "  {} found, {} missing, {} games",
        merged.if_supports_color(Stdout, |t| t.green()),
        missing.if_supports_color(Stdout, |t| t.yellow()),
        outcome.groups.len(),
    );
}
