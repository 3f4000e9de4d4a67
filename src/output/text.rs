//! Plain-text output formatter.
//!
//! One line per file, tab separated, so results pipe cleanly into `cut`,
//! `sort` or `xargs`:
//!
//! - hash mode: `digest<TAB>path`, or `digest<TAB>size<TAB>path` with sizes
//! - size-only mode: `size<TAB>path`
//!
//! Groups are emitted in ascending key order and lines within a group are
//! sorted by path.

use std::io::{self, Write};

use crate::duplicates::{HashGroups, SizeBuckets};

/// Text renderer for scan results.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput {
    print_size: bool,
}

impl TextOutput {
    /// Create a renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the file size column in hash mode.
    #[must_use]
    pub fn with_size(mut self, print_size: bool) -> Self {
        self.print_size = print_size;
        self
    }

    /// Write digest groups.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_hash_groups<W: Write>(&self, writer: &mut W, groups: &HashGroups) -> io::Result<()> {
        let mut digests: Vec<&String> = groups.keys().collect();
        digests.sort();

        for digest in digests {
            let mut members: Vec<_> = groups[digest].iter().collect();
            members.sort_by(|a, b| a.file.path.cmp(&b.file.path));
            for record in members {
                if self.print_size {
                    writeln!(
                        writer,
                        "{}\t{}\t{}",
                        digest,
                        record.file.size,
                        record.file.path.display()
                    )?;
                } else {
                    writeln!(writer, "{}\t{}", digest, record.file.path.display())?;
                }
            }
        }
        Ok(())
    }

    /// Write size groups.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_size_groups<W: Write>(&self, writer: &mut W, groups: &SizeBuckets) -> io::Result<()> {
        let mut sizes: Vec<u64> = groups.keys().copied().collect();
        sizes.sort_unstable();

        for size in sizes {
            let mut members: Vec<_> = groups[&size].iter().collect();
            members.sort_by(|a, b| a.path.cmp(&b.path));
            for record in members {
                writeln!(writer, "{}\t{}", size, record.path.display())?;
            }
        }
        Ok(())
    }
}
