//! Listing the manifests saved in a directory.
//!
//! Manifests are grouped by kind, which is their file extension (`mlib`,
//! `lib`, ...). Only extensions ending in `lib` count. The newest manifest of
//! a kind is the one with the largest timestamp prefix in its file name.

use medialib_common::{ConfigurationError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifests found in one directory, grouped by kind.
#[derive(Debug, Clone)]
pub struct ManifestCatalog {
    dir: PathBuf,
    kinds: BTreeMap<String, Vec<PathBuf>>,
}

impl ManifestCatalog {
    /// List the manifests directly inside `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ConfigurationError::CatalogNotFound {
                path: dir.to_path_buf(),
            }
            .into());
        }

        let mut kinds: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let path = entry.path();
            let Some(kind) = manifest_kind(&path) else {
                continue;
            };
            kinds.entry(kind.to_string()).or_default().push(path);
        }

        for paths in kinds.values_mut() {
            paths.sort();
        }

        debug!("Found {} manifest kinds in {:?}", kinds.len(), dir);

        Ok(Self {
            dir: dir.to_path_buf(),
            kinds,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Kinds present, sorted.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Manifests of a kind, sorted by file name.
    pub fn manifests(&self, kind: &str) -> &[PathBuf] {
        self.kinds.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Newest manifest of a kind by timestamp prefix.
    ///
    /// Files whose name does not start with a numeric timestamp are skipped.
    pub fn latest(&self, kind: &str) -> Option<&Path> {
        self.manifests(kind)
            .iter()
            .filter_map(|path| timestamp_of(path).map(|stamp| (stamp, path)))
            .max_by_key(|(stamp, _)| *stamp)
            .map(|(_, path)| path.as_path())
    }
}

/// Kind of a manifest file, if it is one.
pub fn manifest_kind(path: &Path) -> Option<&str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.ends_with("lib"))
}

/// Timestamp prefix of a generated manifest name.
pub fn timestamp_of(path: &Path) -> Option<i64> {
    let name = path.file_name()?.to_str()?;
    let (stamp, _) = name.split_once('_')?;
    stamp.parse().ok()
}
