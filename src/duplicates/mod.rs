//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Size-based candidate filtering
//! - Concurrent content hashing in a bounded worker pool
//! - Digest grouping and duplicate filtering
//! - The `find_duplicates` / `find_size_duplicates` entry points

pub mod finder;
pub mod groups;
pub mod pool;

pub use finder::{
    find_duplicates, find_size_duplicates, DuplicateFinder, FinderConfig, FinderError,
    ScanSummary,
};
pub use groups::{
    filter_candidates, filter_duplicates, size_only_duplicates, HashGroups, HashedRecord,
    SizeBuckets,
};
pub use pool::{hash_all, hash_candidates, HashConfig, HashStats};
