//! Library manifests.
//!
//! A manifest is a flat text file: the base directory as the first record,
//! then one `"<index> <relative path>"` record per file, every record
//! terminated by the same separator.
//!
//! ```text
//! /music
//! 0 a.mp3
//! 1 albums/b.flac
//! ```

mod allocator;
mod reader;
mod writer;

pub use allocator::{FilenameAllocator, DEFAULT_FILE_TYPE, DEFAULT_SALT_LEN, MAX_SALT_LEN};
pub use reader::Manifest;
pub use writer::{ManifestWriter, StagedManifest};

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One file of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    /// 0-based discovery order.
    pub index: usize,
    /// Path relative to the manifest's base directory.
    pub relative_path: String,
}

impl ManifestEntry {
    pub fn new(index: usize, relative_path: impl Into<String>) -> Self {
        Self {
            index,
            relative_path: relative_path.into(),
        }
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.index, self.relative_path)
    }
}

/// Outcome of a build: where the manifest landed and how many entries it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuiltManifest {
    pub path: PathBuf,
    pub entries: usize,
}
