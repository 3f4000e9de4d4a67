//! dupefinder - duplicate file finder
//!
//! Walks a directory tree, buckets regular files by size, and digests only
//! the files whose size collides with another file. Files that share a
//! digest are reported as duplicates.
//!
//! The library entry points are [`duplicates::find_duplicates`] and
//! [`duplicates::find_size_duplicates`]; [`run_app`] drives them for the
//! `dupefinder` binary.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io;

use anyhow::{Context, Result};

use cli::Cli;
use config::Config;
use duplicates::{DuplicateFinder, FinderConfig};
use error::ExitCode;
use output::Report;

/// Run the command line application.
///
/// Results go to stdout; logs and skip warnings go to stderr.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the root cannot be
/// scanned, or the results cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!("Log level: {}", logging::current_level_name());

    let verbose = cli.verbose > 0;
    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply_cli(&cli)
        .context("Failed to apply command-line options")?;
    log::debug!("Effective configuration: {:?}", config);

    let finder = DuplicateFinder::new(FinderConfig::new(
        config.scan_config(verbose),
        config.hash_config(verbose),
    ));

    let mut stdout = io::stdout().lock();

    if cli.size_only {
        let groups = finder
            .find_size_duplicates(&cli.path)
            .with_context(|| format!("Failed to scan {}", cli.path.display()))?;
        let report = Report::Sizes(&groups);
        report
            .render(&mut stdout, cli.output, config.print_size)
            .context("Failed to write results")?;
        return Ok(ExitCode::from_outcome(!report.is_empty()));
    }

    let (groups, summary) = finder
        .find_duplicates(&cli.path)
        .with_context(|| format!("Failed to scan {}", cli.path.display()))?;
    let report = Report::Hashes(&groups);
    report
        .render(&mut stdout, cli.output, config.print_size)
        .context("Failed to write results")?;

    if let Some(notice) = unhashed_notice(summary.failed_files, verbose) {
        log::warn!("{}", notice);
    }

    Ok(ExitCode::from_outcome(!report.is_empty()))
}

/// Warning for files dropped because they could not be hashed.
///
/// With `-v` each file has already been reported, so only the count is kept.
fn unhashed_notice(failed_files: usize, verbose: bool) -> Option<String> {
    match (failed_files, verbose) {
        (0, _) => None,
        (n, true) => Some(format!("{} files could not be hashed and were left out", n)),
        (n, false) => Some(format!(
            "{} files could not be hashed and were left out (use -v to list them)",
            n
        )),
    }
}
