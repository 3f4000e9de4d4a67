//! Size buckets, digest groups, and the filters between pipeline stages.
//!
//! # Overview
//!
//! Size grouping is the cheap first pass: a file whose size is unique in
//! the tree cannot have a duplicate, so [`filter_candidates`] drops it
//! before any content is read. After hashing, [`filter_duplicates`] applies
//! the same rule to digest groups.
//!
//! [`size_only_duplicates`] is a faster, weaker alternative that stops at
//! size collisions. Files of identical size need not share content, so it
//! is opt-in and never the default.
//!
//! # Example
//!
//! ```
//! use dupefinder::duplicates::{filter_candidates, SizeBuckets};
//! use dupefinder::scanner::FileRecord;
//! use std::path::PathBuf;
//!
//! let mut buckets = SizeBuckets::new();
//! buckets.entry(1024).or_default().push(FileRecord::new(PathBuf::from("/a"), 1024));
//! buckets.entry(1024).or_default().push(FileRecord::new(PathBuf::from("/b"), 1024));
//! buckets.entry(2048).or_default().push(FileRecord::new(PathBuf::from("/c"), 2048));
//!
//! let candidates = filter_candidates(buckets);
//! assert_eq!(candidates.len(), 1);  // Only the 1024-byte bucket can hold duplicates
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::scanner::FileRecord;

pub use crate::scanner::SizeBuckets;

/// A file together with the digest of its content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HashedRecord {
    /// The hashed file
    #[serde(flatten)]
    pub file: FileRecord,
    /// Hex-encoded digest of the whole file or its head
    pub digest: String,
}

impl HashedRecord {
    /// Pair a file with its digest.
    #[must_use]
    pub fn new(file: FileRecord, digest: String) -> Self {
        Self { file, digest }
    }
}

/// Hashed files keyed by digest.
pub type HashGroups = HashMap<String, Vec<HashedRecord>>;

/// Keep only size buckets with two or more files.
///
/// Pure; no I/O.
#[must_use]
pub fn filter_candidates(buckets: SizeBuckets) -> SizeBuckets {
    let before = buckets.len();
    let candidates: SizeBuckets = buckets
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .collect();

    log::debug!(
        "Size filter: {} of {} size buckets hold candidates",
        candidates.len(),
        before
    );
    candidates
}

/// Keep only digest groups with two or more files.
#[must_use]
pub fn filter_duplicates(groups: HashGroups) -> HashGroups {
    groups
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .collect()
}

/// Report size collisions as duplicates without reading any content.
///
/// Fast but unreliable: equal size does not imply equal content.
#[must_use]
pub fn size_only_duplicates(buckets: SizeBuckets) -> SizeBuckets {
    filter_candidates(buckets)
}

/// Number of files across all buckets or groups.
#[must_use]
pub fn count_files<K, V>(map: &HashMap<K, Vec<V>>) -> usize {
    map.values().map(Vec::len).sum()
}

/// Bytes that removing all but one copy in each group would free.
#[must_use]
pub fn reclaimable_bytes(groups: &HashGroups) -> u64 {
    groups
        .values()
        .filter_map(|files| {
            let size = files.first()?.file.size;
            Some(size * (files.len() as u64 - 1))
        })
        .sum()
}
