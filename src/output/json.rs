//! JSON output formatter for duplicate scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! Hash mode maps each digest to its files:
//!
//! ```json
//! {
//!   "d41d8cd98f00b204e9800998ecf8427e": [
//!     { "path": "/tmp/x/b", "name": "b", "size": 0, "digest": "d41d8cd98f00b204e9800998ecf8427e" },
//!     { "path": "/tmp/x/c", "name": "c", "size": 0, "digest": "d41d8cd98f00b204e9800998ecf8427e" }
//!   ]
//! }
//! ```
//!
//! Size-only mode maps each size (as a string key) to `{path, name, size}` records.
//! Keys and members are sorted so output is stable across runs.

use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use super::OutputError;
use crate::duplicates::{HashGroups, HashedRecord, SizeBuckets};
use crate::scanner::FileRecord;

/// Serializable view over scan results.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonOutput<'a> {
    /// Digest groups
    Hashes(BTreeMap<&'a str, Vec<&'a HashedRecord>>),
    /// Size groups
    Sizes(BTreeMap<u64, Vec<&'a FileRecord>>),
}

impl<'a> JsonOutput<'a> {
    /// Build output for digest groups.
    #[must_use]
    pub fn from_hash_groups(groups: &'a HashGroups) -> Self {
        let sorted = groups
            .iter()
            .map(|(digest, records)| {
                let mut members: Vec<_> = records.iter().collect();
                members.sort_by(|a, b| a.file.path.cmp(&b.file.path));
                (digest.as_str(), members)
            })
            .collect();
        Self::Hashes(sorted)
    }

    /// Build output for size groups.
    #[must_use]
    pub fn from_size_groups(groups: &'a SizeBuckets) -> Self {
        let sorted = groups
            .iter()
            .map(|(size, records)| {
                let mut members: Vec<_> = records.iter().collect();
                members.sort_by(|a, b| a.path.cmp(&b.path));
                (*size, members)
            })
            .collect();
        Self::Sizes(sorted)
    }

    /// Compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Stream JSON to `writer` and end it with a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), OutputError> {
        if pretty {
            serde_json::to_writer_pretty(&mut *writer, self)?;
        } else {
            serde_json::to_writer(&mut *writer, self)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
