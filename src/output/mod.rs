//! Output formatters for duplicate scan results.
//!
//! This module provides two output formats:
//! - Plain text, one tab-separated line per file
//! - JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupefinder::duplicates::DuplicateFinder;
//! use dupefinder::output::{Report, ReportFormat};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, _summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let mut stdout = std::io::stdout().lock();
//! Report::Hashes(&groups)
//!     .render(&mut stdout, ReportFormat::Json, false)
//!     .unwrap();
//! ```

pub mod json;
pub mod text;

use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::duplicates::{HashGroups, SizeBuckets};

// Re-export main types
pub use json::JsonOutput;
pub use text::TextOutput;

/// Failure while rendering results.
#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    /// Results could not be encoded as JSON
    #[error("Failed to encode results as JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Results could not be written
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Tab-separated lines
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

/// Results of either detection mode, ready to render.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    /// Content duplicates keyed by digest
    Hashes(&'a HashGroups),
    /// Size collisions keyed by byte count
    Sizes(&'a SizeBuckets),
}

impl Report<'_> {
    /// True when no group was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Hashes(groups) => groups.is_empty(),
            Self::Sizes(groups) => groups.is_empty(),
        }
    }

    /// Render in the requested format.
    ///
    /// `print_size` only affects text output in hash mode.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn render<W: Write>(
        &self,
        writer: &mut W,
        format: ReportFormat,
        print_size: bool,
    ) -> Result<(), OutputError> {
        match format {
            ReportFormat::Text => {
                let text = TextOutput::new().with_size(print_size);
                match self {
                    Self::Hashes(groups) => text.write_hash_groups(writer, groups)?,
                    Self::Sizes(groups) => text.write_size_groups(writer, groups)?,
                }
            }
            ReportFormat::Json => {
                let json = match self {
                    Self::Hashes(groups) => JsonOutput::from_hash_groups(groups),
                    Self::Sizes(groups) => JsonOutput::from_size_groups(groups),
                };
                json.write_to(writer, true)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
