//! Duplicate finder entry points.
//!
//! # Overview
//!
//! This module runs the detection pipeline end to end:
//! 1. **Walk** - Bucket admitted files by size ([`crate::scanner::walker`])
//! 2. **Size filter** - Drop sizes held by a single file
//! 3. **Hash** - Digest the remaining candidates in a bounded worker pool
//! 4. **Aggregate** - Keep digests shared by two or more files
//!
//! [`find_size_duplicates`] stops after step 2 and is the fast, unreliable
//! heuristic mode.
//!
//! Each call is independent: a fresh walk and a fresh worker pool, with no
//! state kept between calls.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::{find_duplicates, HashConfig};
//! use dupefinder::scanner::ScanConfig;
//! use std::path::Path;
//!
//! let groups = find_duplicates(
//!     Path::new("/some/path"),
//!     &ScanConfig::default(),
//!     &HashConfig::default(),
//! )
//! .unwrap();
//!
//! for (digest, files) in &groups {
//!     println!("{}: {} copies", digest, files.len());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bytesize::ByteSize;

use super::groups::{
    count_files, filter_candidates, filter_duplicates, reclaimable_bytes, size_only_duplicates,
    HashGroups, SizeBuckets,
};
use super::pool::{hash_candidates, HashConfig};
use crate::scanner::{ScanConfig, ScanError, Walker};

/// Errors that abort a duplicate search.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The walk hit an I/O error it cannot skip.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl From<ScanError> for FinderError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::NotFound(path) => Self::PathNotFound(path),
            ScanError::NotADirectory(path) => Self::NotADirectory(path),
            ScanError::Io { path, source } => Self::Io { path, source },
        }
    }
}

/// Configuration for a full duplicate search.
#[derive(Debug, Clone, Default)]
pub struct FinderConfig {
    /// Walk filters
    pub scan: ScanConfig,
    /// Hashing stage settings
    pub hash: HashConfig,
}

impl FinderConfig {
    /// Bundle walk and hash settings.
    #[must_use]
    pub fn new(scan: ScanConfig, hash: HashConfig) -> Self {
        Self { scan, hash }
    }
}

/// Summary statistics from a duplicate search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files admitted by the walk
    pub total_files: u64,
    /// Files whose size collides with another file
    pub candidate_files: usize,
    /// Files digested successfully
    pub hashed_files: usize,
    /// Files left out because hashing failed
    pub failed_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Copies beyond the first in each group
    pub duplicate_files: usize,
    /// Bytes freed by keeping one copy per group
    pub reclaimable_space: u64,
    /// Wall-clock duration of the search
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Runs the detection pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// The finder's configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Find files under `path` that share a content digest.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root is missing or not a directory,
    /// or if the walk hits a non-permission I/O error. Unreadable files
    /// and directories are skipped, not reported as errors.
    pub fn find_duplicates(&self, path: &Path) -> Result<(HashGroups, ScanSummary), FinderError> {
        let start = Instant::now();
        log::info!("Starting duplicate scan of {}", path.display());

        let (buckets, total_files) = Walker::new(path, self.config.scan.clone()).scan()?;
        let candidates = filter_candidates(buckets);
        let candidate_files = count_files(&candidates);
        log::info!(
            "Found {} files, {} share a size with another file",
            total_files,
            candidate_files
        );

        let (digests, stats) = hash_candidates(candidates, &self.config.hash);
        let groups = filter_duplicates(digests);

        let duplicate_files = count_files(&groups) - groups.len();
        let summary = ScanSummary {
            total_files,
            candidate_files,
            hashed_files: stats.hashed,
            failed_files: stats.failed,
            duplicate_groups: groups.len(),
            duplicate_files,
            reclaimable_space: reclaimable_bytes(&groups),
            scan_duration: start.elapsed(),
        };

        log::info!(
            "Found {} duplicate groups ({} redundant copies, {} reclaimable) in {:.2?}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    /// Find files under `path` that share a size, without hashing.
    ///
    /// # Errors
    ///
    /// Same as [`DuplicateFinder::find_duplicates`].
    pub fn find_size_duplicates(&self, path: &Path) -> Result<SizeBuckets, FinderError> {
        log::info!("Starting size-only scan of {}", path.display());

        let (buckets, total_files) = Walker::new(path, self.config.scan.clone()).scan()?;
        let groups = size_only_duplicates(buckets);

        log::info!(
            "Found {} files, {} size groups with collisions",
            total_files,
            groups.len()
        );
        Ok(groups)
    }
}

/// Find duplicate files under `root` by content digest.
///
/// # Errors
///
/// See [`DuplicateFinder::find_duplicates`].
pub fn find_duplicates(
    root: &Path,
    scan: &ScanConfig,
    hash: &HashConfig,
) -> Result<HashGroups, FinderError> {
    DuplicateFinder::new(FinderConfig::new(scan.clone(), hash.clone()))
        .find_duplicates(root)
        .map(|(groups, _)| groups)
}

/// Find files under `root` that share a size. Fast but heuristic.
///
/// # Errors
///
/// See [`DuplicateFinder::find_duplicates`].
pub fn find_size_duplicates(root: &Path, scan: &ScanConfig) -> Result<SizeBuckets, FinderError> {
    DuplicateFinder::new(FinderConfig::new(scan.clone(), HashConfig::default()))
        .find_size_duplicates(root)
}
