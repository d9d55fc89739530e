//! Staleness check between a source image and its derived WebP copy.

use filetime::FileTime;
use std::path::{Path, PathBuf};

/// Sibling of `source` with the same stem and `extension`.
pub fn derived_path(source: &Path, extension: &str) -> PathBuf {
    source.with_extension(extension)
}

/// Last modification time, or `FileTime::zero()` when it cannot be read.
pub fn modified_time(path: &Path) -> FileTime {
    std::fs::metadata(path)
        .map(|m| FileTime::from_last_modification_time(&m))
        .unwrap_or_else(|_| FileTime::zero())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No derived file yet.
    Missing,
    /// Derived file is strictly older than the source.
    Stale,
    /// Derived file is at least as new as the source.
    Fresh,
}

impl Freshness {
    pub fn evaluate(source: &Path, derived: &Path) -> Self {
        if !derived.exists() {
            return Freshness::Missing;
        }
        Self::compare(modified_time(source), modified_time(derived))
    }

    /// Equal times count as fresh.
    pub fn compare(source_mtime: FileTime, derived_mtime: FileTime) -> Self {
        if source_mtime > derived_mtime {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    pub fn needs_regeneration(self) -> bool {
        !matches!(self, Freshness::Fresh)
    }
}
