//! Reading manifests back.

use super::ManifestEntry;
use medialib_common::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Placeholder path for manifests parsed from memory.
const INLINE_SOURCE: &str = "<inline>";

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub base_dir: String,
    pub separator: String,
    pub entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse manifest content.
    ///
    /// The first record is the base directory and must not be empty. Each
    /// further record is split at its first space into index and relative
    /// path; records missing either part are ignored. Indices must be
    /// non-negative integers and may not repeat.
    pub fn parse(content: &str, separator: &str) -> Result<Self> {
        if separator.is_empty() {
            return Err(Error::malformed(INLINE_SOURCE, "empty separator"));
        }

        let mut records = content.split(separator);
        let base_dir = match records.next() {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => {
                return Err(Error::malformed(
                    INLINE_SOURCE,
                    "missing base directory record",
                ))
            }
        };

        let mut entries = Vec::new();
        let mut seen = HashSet::new();
        for record in records {
            let Some((index, relative_path)) = record.split_once(' ') else {
                continue;
            };
            if index.is_empty() || relative_path.is_empty() {
                continue;
            }

            let index: usize = index.parse().map_err(|_| {
                Error::malformed(INLINE_SOURCE, format!("invalid entry index {index:?}"))
            })?;
            if !seen.insert(index) {
                return Err(Error::malformed(
                    INLINE_SOURCE,
                    format!("duplicate entry index {index}"),
                ));
            }
            entries.push(ManifestEntry::new(index, relative_path));
        }

        Ok(Self {
            base_dir,
            separator: separator.to_string(),
            entries,
        })
    }

    /// Read and parse a manifest file.
    pub fn load(path: &Path, separator: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, separator).map_err(|e| match e {
            Error::MalformedManifest { reason, .. } => Error::malformed(path, reason),
            other => other,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by index.
    pub fn get(&self, index: usize) -> Option<&ManifestEntry> {
        self.entries.iter().find(|e| e.index == index)
    }

    /// Full path of an entry below the base directory. The file must exist.
    pub fn resolve(&self, index: usize) -> Result<PathBuf> {
        let entry = self.get(index).ok_or(Error::EntryNotFound { index })?;
        let path = Path::new(&self.base_dir).join(&entry.relative_path);
        if !path.exists() {
            return Err(Error::path_not_found(path));
        }
        Ok(path)
    }
}
