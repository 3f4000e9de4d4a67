//! Bounded worker pool that digests candidate files.
//!
//! # Overview
//!
//! Candidates are flattened into one work list and pushed by a producer
//! thread into a bounded queue. A fixed set of `worker_count` workers pulls
//! from that queue, opens one file at a time, digests it, closes it and
//! sends the outcome to a result channel. The calling thread is the only
//! collector and the only writer of the digest map.
//!
//! The queue bound is what keeps open file handles near `worker_count`:
//! the producer blocks while the queue is full, so tens of thousands of
//! candidates never turn into tens of thousands of open descriptors.
//!
//! Group membership does not depend on `worker_count`; only the order of
//! records inside a group may change between runs.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::{filter_candidates, hash_all, HashConfig};
//! use dupefinder::scanner::{scan, ScanConfig};
//! use std::path::Path;
//!
//! let (buckets, _) = scan(Path::new("."), &ScanConfig::default()).unwrap();
//! let config = HashConfig::default().with_worker_count(4);
//! let groups = hash_all(filter_candidates(buckets), &config);
//! println!("{} distinct digests", groups.len());
//! ```

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;

use super::groups::{HashGroups, HashedRecord, SizeBuckets};
use crate::scanner::{
    DiagnosticSink, Diagnostics, FileRecord, HashAlgorithm, HashError, Hasher,
};

/// Configuration for the hashing stage.
#[derive(Debug, Clone)]
pub struct HashConfig {
    /// Number of concurrent hashing workers (clamped to at least 1).
    pub worker_count: usize,
    /// Digest algorithm.
    pub algorithm: HashAlgorithm,
    /// Hash only the first `partial_bytes` of each file.
    ///
    /// Files sharing those bytes land in the same group even if they
    /// differ later on.
    pub partial: bool,
    /// Byte limit used when `partial` is set; 0 hashes whole files.
    pub partial_bytes: u64,
    /// Skip warnings.
    pub diagnostics: Diagnostics,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            algorithm: HashAlgorithm::Md5,
            partial: false,
            partial_bytes: 0,
            diagnostics: Diagnostics::default(),
        }
    }
}

impl HashConfig {
    /// Set the number of hashing workers.
    #[must_use]
    pub fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers.max(1);
        self
    }

    /// Set the digest algorithm.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Hash only the first `bytes` bytes of each file.
    #[must_use]
    pub fn with_partial(mut self, bytes: u64) -> Self {
        self.partial = true;
        self.partial_bytes = bytes;
        self
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

    /// Effective worker count.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.worker_count.max(1)
    }

    /// Hasher matching this configuration.
    #[must_use]
    pub fn hasher(&self) -> Hasher {
        let hasher = Hasher::new(self.algorithm);
        if self.partial {
            hasher.with_partial(self.partial_bytes)
        } else {
            hasher
        }
    }
}

/// Counters from one hashing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashStats {
    /// Files submitted to the pool
    pub submitted: usize,
    /// Files digested successfully
    pub hashed: usize,
    /// Files left out because opening or reading failed
    pub failed: usize,
}

/// Digest every candidate and group the results by digest.
///
/// Blocks until all work is done and every worker has exited. Files that
/// fail to open or read are left out and reported to the configured sink
/// when verbose.
#[must_use]
pub fn hash_all(candidates: SizeBuckets, config: &HashConfig) -> HashGroups {
    hash_candidates(candidates, config).0
}

/// Like [`hash_all`], also returning counters.
#[must_use]
pub fn hash_candidates(candidates: SizeBuckets, config: &HashConfig) -> (HashGroups, HashStats) {
    let files: Vec<FileRecord> = candidates.into_values().flatten().collect();
    let mut stats = HashStats {
        submitted: files.len(),
        ..Default::default()
    };

    if files.is_empty() {
        log::debug!("Hashing: no candidates");
        return (HashGroups::new(), stats);
    }

    let workers = config.workers();
    let hasher = config.hasher();
    log::info!(
        "Hashing {} files with {} worker(s) using {}{}",
        files.len(),
        workers,
        hasher.algorithm(),
        hasher
            .limit()
            .map(|n| format!(" (first {} bytes)", n))
            .unwrap_or_default()
    );

    let (work_tx, work_rx) = bounded::<FileRecord>(workers);
    let (result_tx, result_rx) = bounded::<Result<HashedRecord, HashError>>(workers);

    let groups = thread::scope(|s| {
        for id in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            s.spawn(move || {
                for file in work_rx {
                    log::trace!("Worker {} hashing {}", id, file.path.display());
                    let outcome = hasher
                        .hash(&file.path)
                        .map(|digest| HashedRecord::new(file, digest));
                    if result_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
        }
        // Only workers hold these now, so the channels close when they finish
        drop(work_rx);
        drop(result_tx);

        s.spawn(move || {
            for file in files {
                if work_tx.send(file).is_err() {
                    break;
                }
            }
        });

        let mut groups = HashGroups::new();
        for outcome in result_rx {
            match outcome {
                Ok(record) => {
                    stats.hashed += 1;
                    groups.entry(record.digest.clone()).or_default().push(record);
                }
                Err(e) => {
                    stats.failed += 1;
                    log::debug!("Failed to hash {}: {}", e.path().display(), e);
                    config
                        .diagnostics
                        .skipped(format_args!("Skipping file that could not be hashed: {}", e));
                }
            }
        }
        groups
    });

    log::info!(
        "Hashed {} files ({} failed), {} distinct digests",
        stats.hashed,
        stats.failed,
        groups.len()
    );

    (groups, stats)
}
