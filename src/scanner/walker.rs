//! Directory walker that buckets regular files by size.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting [`FileRecord`]s keyed by exact size. It uses
//! [`walkdir`] on a single thread: whether to prune a directory is decided
//! before descending into it, and the walk is bound by metadata I/O rather
//! than CPU.
//!
//! # Failure Handling
//!
//! - Permission denied on a directory or file: the unit (and the subtree
//!   under a directory) is skipped and reported to the configured
//!   diagnostic sink when verbose.
//! - Any other I/O error, including a missing root: the scan aborts.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::{ScanConfig, Walker};
//! use std::path::Path;
//!
//! let config = ScanConfig::new(0, None, ["node_modules", ".git"]);
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! let (buckets, visited) = walker.scan().unwrap();
//! println!("{} files, {} distinct sizes", visited, buckets.len());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{FileRecord, IoKind, ScanConfig, ScanError, SizeBuckets};

/// Sequential directory walker.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: ScanConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Size and pruning filters
    #[must_use]
    pub fn new(path: &Path, config: ScanConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the tree and bucket admitted files by size.
    ///
    /// Returns the buckets and the number of files admitted into them.
    /// The root itself is never an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if the root is missing or not a directory, or
    /// if any non-permission I/O error occurs during the walk.
    pub fn scan(&self) -> Result<(SizeBuckets, u64), ScanError> {
        let mut buckets = SizeBuckets::new();
        let mut visited: u64 = 0;

        if !self.check_root()? {
            return Ok((buckets, visited));
        }

        let walk = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_prune(entry));

        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    self.handle_walk_error(err)?;
                    continue;
                }
            };

            // Symlinks are not followed, so they never report as files
            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    self.handle_walk_error(err)?;
                    continue;
                }
            };

            let size = metadata.len();
            if !self.config.admits_size(size) {
                log::trace!(
                    "Skipping file due to size filter ({}): {}",
                    size,
                    entry.path().display()
                );
                continue;
            }

            visited += 1;
            buckets
                .entry(size)
                .or_default()
                .push(FileRecord::new(entry.into_path(), size));
        }

        log::debug!(
            "Walked {}: {} files in {} size buckets",
            self.root.display(),
            visited,
            buckets.len()
        );

        Ok((buckets, visited))
    }

    /// Validate the root before walking.
    ///
    /// Returns `false` when the root cannot be read due to permissions,
    /// in which case the scan yields nothing.
    fn check_root(&self) -> Result<bool, ScanError> {
        match fs::metadata(&self.root) {
            Ok(m) if m.is_dir() => Ok(true),
            Ok(_) => Err(ScanError::NotADirectory(self.root.clone())),
            Err(e) => match IoKind::of(&e) {
                IoKind::PermissionDenied => {
                    self.report_denied(&self.root, &e);
                    Ok(false)
                }
                IoKind::NotFound => Err(ScanError::NotFound(self.root.clone())),
                IoKind::Other => Err(ScanError::Io {
                    path: self.root.clone(),
                    source: e,
                }),
            },
        }
    }

    /// Decide whether to descend into a directory entry.
    fn should_prune(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let skip = self.config.is_skipped_dir(entry.path());
        if skip {
            log::debug!("Skipping directory: {}", entry.path().display());
        }
        skip
    }

    /// Skip permission failures, abort on everything else.
    fn handle_walk_error(&self, error: walkdir::Error) -> Result<(), ScanError> {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        if error.io_error().map(IoKind::of) == Some(IoKind::PermissionDenied) {
            log::debug!("Permission denied while walking: {}", path.display());
            self.config.diagnostics.skipped(format_args!(
                "Skipping path that could not be read {}: {}",
                path.display(),
                error
            ));
            return Ok(());
        }

        let message = error.to_string();
        let source = error
            .into_io_error()
            .unwrap_or_else(|| io::Error::other(message));
        log::warn!("Walker error for {}: {}", path.display(), source);
        Err(ScanError::Io { path, source })
    }

    fn report_denied(&self, path: &Path, error: &io::Error) {
        log::debug!("Permission denied: {}", path.display());
        self.config.diagnostics.skipped(format_args!(
            "Skipping path that could not be read {}: {}",
            path.display(),
            error
        ));
    }
}

/// Walk `root` and bucket its regular files by size.
///
/// Convenience wrapper around [`Walker::scan`].
///
/// # Errors
///
/// See [`Walker::scan`].
pub fn scan(root: &Path, config: &ScanConfig) -> Result<(SizeBuckets, u64), ScanError> {
    Walker::new(root, config.clone()).scan()
}
