//! Command-line interface definitions for dupefinder.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Print every group of identical files under ~/Downloads
//! dupefinder ~/Downloads
//!
//! # Hash with four workers, only the first 64 KiB of each file
//! dupefinder -p 4 --hash-bytes 64KiB ~/Downloads
//!
//! # Size collisions only, as JSON
//! dupefinder --size-only --output json ~/Downloads
//!
//! # Skip VCS metadata, report skipped files
//! dupefinder -v --skip-dir .git --skip-dir node_modules ~/src
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::output::ReportFormat;
use crate::scanner::HashAlgorithm;

/// Find duplicate files by content digest.
///
/// Files are bucketed by size first; only files whose size collides with
/// another file are read and hashed.
#[derive(Debug, Parser)]
#[command(name = "dupefinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity (-v info and skip warnings, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: ReportFormat,

    /// File listing directory names or paths to skip, one per line
    ///
    /// Blank lines and lines starting with '#' are ignored.
    #[arg(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// Directory name or path to skip (can be specified multiple times)
    #[arg(long = "skip-dir", value_name = "DIR")]
    pub skip_dirs: Vec<String>,

    /// Include file sizes in text output
    #[arg(long)]
    pub print_size: bool,

    /// Number of concurrent hashing workers (default: 1)
    #[arg(short, long, value_name = "N")]
    pub parallel: Option<usize>,

    /// Hash only the first SIZE bytes of each file (0 hashes whole files)
    ///
    /// Faster on large files, but files that share a prefix are reported
    /// as duplicates even if they differ later on.
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub hash_bytes: Option<u64>,

    /// Digest algorithm: md5, sha1, sha256 or xxhash (default: md5)
    #[arg(long, value_name = "ALGO", value_parser = parse_algorithm)]
    pub algo: Option<HashAlgorithm>,

    /// Report files that share a size, without reading their content
    ///
    /// Fast but unreliable: equal size does not mean equal content.
    #[arg(long)]
    pub size_only: bool,

    /// Minimum file size to consider (e.g., 1KB, 1MB, 1GB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Maximum file size to consider; 0 means no limit
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Configuration file (TOML) to load instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print errors as JSON objects on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Parse a digest algorithm name.
///
/// # Errors
///
/// Returns an error naming the accepted values if `s` is not one of them.
pub fn parse_algorithm(s: &str) -> Result<HashAlgorithm, String> {
    s.parse::<HashAlgorithm>().map_err(|e| e.to_string())
}

/// Size suffixes accepted by [`parse_size`], matched case-insensitively.
const SIZE_UNITS: &[(&str, u64)] = &[
    ("", 1),
    ("B", 1),
    ("K", 1_000),
    ("KB", 1_000),
    ("KIB", 1 << 10),
    ("M", 1_000_000),
    ("MB", 1_000_000),
    ("MIB", 1 << 20),
    ("G", 1_000_000_000),
    ("GB", 1_000_000_000),
    ("GIB", 1 << 30),
    ("T", 1_000_000_000_000),
    ("TB", 1_000_000_000_000),
    ("TIB", 1 << 40),
];

/// Parse a human-readable size such as `512`, `64KiB` or `1.5 GB` into bytes.
///
/// Decimal suffixes (KB, MB, ...) are powers of 1000 and binary ones
/// (KiB, MiB, ...) powers of 1024. A bare number is a byte count.
///
/// ```
/// use dupefinder::cli::parse_size;
///
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// ```
///
/// # Errors
///
/// Returns a message for empty input, a malformed number or an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let unit = unit.trim().to_ascii_uppercase();

    let value: f64 = number
        .parse()
        .map_err(|_| format!("Invalid size '{s}': expected a number followed by an optional unit"))?;
    let multiplier = SIZE_UNITS
        .iter()
        .find(|(suffix, _)| *suffix == unit)
        .map(|(_, m)| *m)
        .ok_or_else(|| format!("Unknown size unit '{unit}' (use B, KB, KiB, MB, MiB, GB, GiB, TB or TiB)"))?;

    Ok((value * multiplier as f64) as u64)
}
