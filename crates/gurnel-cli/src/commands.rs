/// Command-line surface and command dispatch.
use crate::config::Config;
use crate::report;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gurnel_core::analysis::{ReferenceTable, StatsReport};
use gurnel_core::clock::{Clock, SystemClock};
use gurnel_core::entry::JournalFiles;
use gurnel_core::scanner::{collect_stats, Cancellation};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "gurnel",
    version,
    about = "A simple journal manager",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Config file to use instead of `<config dir>/gurnel/config.json`.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show journal statistics.
    ///
    /// Reports the share of days journaled since the first entry, total and
    /// average word counts, and the words used unusually often or rarely
    /// compared to everyday English.
    Stats(StatsArgs),
}

#[derive(Debug, clap::Args)]
pub struct StatsArgs {
    /// Journal directory. Defaults to the current directory.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Words listed per ranking section.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Scanner worker threads.
    #[arg(long, value_name = "N")]
    pub scanners: Option<usize>,
}

/// Execute a parsed command line, writing command output to `out`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;

    match cli.command {
        Command::Stats(args) => {
            if let Some(top) = args.top {
                config.top_words = top;
            }
            if let Some(scanners) = args.scanners {
                config.scanners = scanners;
            }
            let dir = match args.dir {
                Some(dir) => dir,
                None => std::env::current_dir().context("resolving current directory")?,
            };
            run_stats(&dir, &config, &SystemClock, out)
        }
    }
}

/// Collect statistics for the journal under `dir` and render them.
pub fn run_stats<W: Write>(dir: &Path, config: &Config, clock: &dyn Clock, out: &mut W) -> Result<()> {
    let reference = match &config.reference_path {
        Some(path) => ReferenceTable::from_path(path),
        None => ReferenceTable::bundled(),
    }
    .context("loading reference word frequencies")?;

    let root = dir
        .canonicalize()
        .with_context(|| format!("resolving journal directory {}", dir.display()))?;
    let today = clock.today();

    let stats = collect_stats(
        root.clone(),
        Arc::new(JournalFiles),
        config.scanners,
        today,
        &Cancellation::new(),
    )
    .with_context(|| format!("collecting statistics for {}", root.display()))?;
    info!("{} entries, {} words", stats.entries, stats.total_words);

    let report = StatsReport::build(stats, &reference, today);
    report::render(&report, config.top_words, out).context("writing report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_stats_flags() {
        let cli = Cli::try_parse_from([
            "gurnel", "stats", "--dir", "/j", "--top", "5", "--scanners", "3", "--config", "/c.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/c.json")));
        let Command::Stats(args) = cli.command;
        assert_eq!(args.dir, Some(PathBuf::from("/j")));
        assert_eq!(args.top, Some(5));
        assert_eq!(args.scanners, Some(3));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["gurnel"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["gurnel", "publish"]).is_err());
    }
}
