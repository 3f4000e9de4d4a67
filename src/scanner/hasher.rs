//! Streaming file hasher.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct, which digests file content
//! with one of the algorithms in [`HashAlgorithm`]. Content is streamed
//! through a fixed-size buffer, so memory use does not grow with file size.
//!
//! # Partial Hashing
//!
//! A hasher built with [`Hasher::with_partial`] reads at most the first
//! `n` bytes of each file. Files shorter than `n` are digested in full and
//! that is not an error. Two files that share their first `n` bytes get the
//! same digest even when the rest differs, so partial mode can report
//! false duplicates.
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::scanner::{HashAlgorithm, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new(HashAlgorithm::Sha256);
//! let digest = hasher.hash(Path::new("file.txt")).unwrap();
//! println!("{}", digest);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use xxhash_rust::xxh64::Xxh64;

use super::HashError;

/// Read buffer size for streaming file content (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithm applied to file content.
///
/// Ordered fastest to slowest: xxhash, sha1, md5, sha256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit)
    #[default]
    Md5,
    /// SHA-1 (160-bit)
    Sha1,
    /// SHA-256 (256-bit)
    Sha256,
    /// xxHash64 with seed 0 (64-bit, not cryptographic)
    Xxhash,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Xxhash];

    /// Lowercase name used on the command line and in config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Xxhash => "xxhash",
        }
    }

    /// Length of the hex-encoded digest.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha1 => 40,
            Self::Sha256 => 64,
            Self::Xxhash => 16,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An algorithm name that is not one of md5, sha1, sha256 or xxhash.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hash algorithm '{0}' (expected one of: md5, sha1, sha256, xxhash)")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|algo| algo.name() == wanted)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Running digest state for one file.
enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Xxhash(Xxh64),
}

impl DigestState {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Xxhash => Self::Xxhash(Xxh64::new(0)),
        }
    }

    fn finish(self) -> String {
        match self {
            Self::Md5(h) => format!("{:x}", h.finalize()),
            Self::Sha1(h) => format!("{:x}", h.finalize()),
            Self::Sha256(h) => format!("{:x}", h.finalize()),
            Self::Xxhash(h) => format!("{:016x}", h.digest()),
        }
    }
}

impl Write for DigestState {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Md5(h) => Digest::update(h, buf),
            Self::Sha1(h) => Digest::update(h, buf),
            Self::Sha256(h) => Digest::update(h, buf),
            Self::Xxhash(h) => h.update(buf),
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// File hasher for a fixed algorithm and read limit.
///
/// Cheap to copy; each worker in the hash pool uses its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hasher {
    algorithm: HashAlgorithm,
    /// Maximum number of bytes to read per file; `None` reads everything.
    limit: Option<u64>,
}

impl Hasher {
    /// Create a whole-file hasher.
    #[must_use]
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            limit: None,
        }
    }

    /// Only digest the first `bytes` bytes of each file.
    ///
    /// A limit of 0 means whole-file hashing.
    #[must_use]
    pub fn with_partial(mut self, bytes: u64) -> Self {
        self.limit = (bytes > 0).then_some(bytes);
        self
    }

    /// The configured algorithm.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// The per-file read limit, if partial hashing is enabled.
    #[must_use]
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Open `path`, digest its content and close it again.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or a read fails.
    /// Reaching end-of-file before the partial limit is not an error.
    pub fn hash(&self, path: &Path) -> Result<String, HashError> {
        let file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        self.hash_reader(BufReader::with_capacity(BUFFER_SIZE, file))
            .map_err(|e| HashError::from_io(path, e))
    }

    /// Digest everything `reader` yields, up to the configured limit.
    ///
    /// # Errors
    ///
    /// Propagates read errors from `reader`.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<String> {
        let mut state = DigestState::new(self.algorithm);
        match self.limit {
            Some(limit) => io::copy(&mut reader.take(limit), &mut state)?,
            None => io::copy(&mut reader, &mut state)?,
        };
        Ok(state.finish())
    }
}
