//! romsift CLI
//!
//! Reconcile a ROM collection against a No-Intro or Redump catalog, then pick
//! one file per game.

mod commands;
mod error;
mod prompt;
mod romset_log;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "romsift")]
#[command(about = "Reconcile ROM collections against catalog files", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/romsift/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by commands that read a catalog and a ROM directory.
#[derive(Args, Clone)]
struct SourceArgs {
    /// Catalog document (No-Intro XMDB or Redump datfile)
    #[arg(long)]
    dat: PathBuf,

    /// Directory holding the ROM files
    #[arg(long)]
    dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Match catalog releases to files, fixing names on disk
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Show planned renames without executing
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Never ask about ambiguous matches; report them instead
        #[arg(long)]
        no_interrupt: bool,

        /// Write a romset log to this directory
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// System name for the romset log (defaults to the catalog name)
        #[arg(long)]
        system: Option<String>,
    },

    /// Print the best file of every game (1G1R)
    Select {
        #[command(flatten)]
        source: SourceArgs,

        /// Print selections as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect engine settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the settings file path
    Path,

    /// Print the effective settings as TOML
    Show,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result: Result<(), CliError> = match cli.command {
        Commands::Scan {
            source,
            dry_run,
            no_interrupt,
            log_dir,
            system,
        } => commands::scan::run_scan(commands::scan::ScanArgs {
            dat: source.dat,
            dir: source.dir,
            config: cli.config,
            dry_run,
            interactive: !no_interrupt,
            log_dir,
            system,
            quiet: cli.quiet,
        }),
        Commands::Select { source, json } => {
            commands::select::run_select(&source.dat, &source.dir, cli.config.as_deref(), json)
        }
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Show => commands::config::run_config_show(cli.config.as_deref()),
        },
    };

    if let Err(e) = result {
        eprintln!(
            "{} {}",
            "Error:".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

/// Plain-message logger on stdout; `RUST_LOG` still overrides the level.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}
