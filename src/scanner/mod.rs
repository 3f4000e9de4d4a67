//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Sequential directory walking with subtree pruning
//! - Size-range filtering of regular files
//! - Content digests (MD5, SHA-1, SHA-256, xxHash64)
//! - Classification of I/O failures into skip / abort decisions
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and size bucketing
//! - [`hasher`]: Streaming digest computation over whole files or file heads
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::{scan, ScanConfig};
//! use std::path::Path;
//!
//! let config = ScanConfig {
//!     min_size: 1024, // Skip files under 1KB
//!     ..Default::default()
//! };
//!
//! let (buckets, visited) = scan(Path::new("."), &config).unwrap();
//! println!("{} files in {} size buckets", visited, buckets.len());
//! ```

pub mod hasher;
pub mod walker;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Serialize, Serializer};

// Re-export main types
pub use hasher::{HashAlgorithm, Hasher, UnknownAlgorithm};
pub use walker::{scan, Walker};

/// Files keyed by their exact size, in walk order within each bucket.
pub type SizeBuckets = HashMap<u64, Vec<FileRecord>>;

/// A regular file discovered during the walk.
///
/// Identity is the path. Records are never mutated after the walker
/// creates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRecord {
    /// Path to the file, joined from the scan root
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    /// Base name of the file
    pub name: String,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord, deriving the name from the path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name, size }
    }
}

/// Paths are emitted as strings; bytes that are not valid UTF-8 become U+FFFD,
/// as with `Path::display`.
fn serialize_path_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Coarse classification of an I/O failure.
///
/// Every skip-or-abort decision in the scanner and the hash pool is made
/// on this value rather than on platform error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoKind {
    /// Access was refused; the unit is skipped and the run continues.
    PermissionDenied,
    /// The path vanished or never existed.
    NotFound,
    /// Anything else.
    Other,
}

impl IoKind {
    /// Classify an I/O error.
    #[must_use]
    pub fn of(error: &io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::Other,
        }
    }
}

/// Receiver for warnings about skipped directories and files.
///
/// Injected through [`ScanConfig`] and the hash pool configuration so
/// that embedding code decides where skip warnings end up.
pub trait DiagnosticSink: Send + Sync {
    /// Report a unit that was skipped without aborting the run.
    fn warn(&self, message: &str);
}

/// Sink that forwards warnings to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// Sink that drops every warning.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn warn(&self, _message: &str) {}
}

/// Verbosity switch plus the sink it gates.
///
/// Shared by the scan and hash configurations.
#[derive(Clone)]
pub struct Diagnostics {
    /// Emit skip warnings to the sink.
    pub verbose: bool,
    /// Where skip warnings go.
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    /// Diagnostics that report to `sink` when `verbose` is set.
    #[must_use]
    pub fn new(verbose: bool, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { verbose, sink }
    }

    /// Forward a skip warning when verbose.
    pub fn skipped(&self, message: impl fmt::Display) {
        if self.verbose {
            self.sink.warn(&message.to_string());
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(false, Arc::new(LogSink))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("verbose", &self.verbose)
            .field("sink", &"<sink>")
            .finish()
    }
}

/// Configuration for directory walking.
///
/// Controls size filtering and subtree pruning.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Minimum file size to include (inclusive, in bytes).
    pub min_size: u64,

    /// Maximum file size to include (inclusive, in bytes).
    /// `None` means unbounded.
    pub max_size: Option<u64>,

    /// Directory base names or full paths whose subtrees are pruned.
    pub skip_dirs: HashSet<String>,

    /// Skip warnings.
    pub diagnostics: Diagnostics,
}

impl ScanConfig {
    /// Create a new configuration.
    ///
    /// # Arguments
    ///
    /// * `min_size` - Minimum file size filter
    /// * `max_size` - Maximum file size filter
    /// * `skip_dirs` - Directory names or paths to prune
    #[must_use]
    pub fn new<I, S>(min_size: u64, max_size: Option<u64>, skip_dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min_size,
            max_size,
            skip_dirs: skip_dirs.into_iter().map(Into::into).collect(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Turn skip warnings on or off.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.diagnostics.verbose = verbose;
        self
    }

    /// Route skip warnings to a custom sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics.sink = sink;
        self
    }

    /// Check if a file size falls inside the configured range.
    #[must_use]
    pub fn admits_size(&self, size: u64) -> bool {
        size >= self.min_size && self.max_size.is_none_or(|max| size <= max)
    }

    /// Check if a directory should be pruned by name or full path.
    #[must_use]
    pub fn is_skipped_dir(&self, path: &Path) -> bool {
        if self.skip_dirs.is_empty() {
            return false;
        }
        let by_name = path
            .file_name()
            .is_some_and(|n| self.skip_dirs.contains(&*n.to_string_lossy()));
        by_name
            || self
                .skip_dirs
                .iter()
                .any(|skip| Path::new(skip) == path)
    }
}

/// Errors that abort a directory scan.
///
/// Permission failures never appear here; they are skipped in place.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while walking.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Errors that can occur while hashing a single file.
///
/// These never abort a run; the file is left out of every group.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when opening the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl HashError {
    /// Build a hash error from an I/O failure on `path`.
    #[must_use]
    pub fn from_io(path: &Path, error: io::Error) -> Self {
        match IoKind::of(&error) {
            IoKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            IoKind::NotFound => Self::NotFound(path.to_path_buf()),
            IoKind::Other => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// Path of the file that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) => path,
            Self::Io { path, .. } => path,
        }
    }
}
