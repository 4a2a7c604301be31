//! Manifest serialization.
//!
//! Content is written to a temporary file next to its destination and only
//! moved into place once every record is on disk, so a manifest is either
//! complete or absent.

use super::{BuiltManifest, FilenameAllocator, ManifestEntry};
use medialib_common::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Mode of finished manifests; other processes only need to read them.
#[cfg(unix)]
const MANIFEST_MODE: u32 = 0o644;

/// Serializes a base directory and its entries with a fixed separator.
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    separator: String,
}

impl ManifestWriter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Write the manifest to a temporary file inside `dir`.
    ///
    /// Entries are consumed one at a time. The temporary file is removed if
    /// writing fails or the returned [`StagedManifest`] is dropped.
    pub fn stage<I>(&self, dir: &Path, base_dir: &str, entries: I) -> Result<StagedManifest>
    where
        I: IntoIterator<Item = ManifestEntry>,
    {
        self.stage_with(dir, base_dir, |_| entries)
    }

    /// Like [`stage`](Self::stage), but the entries are produced only once
    /// the temporary file exists, from its path.
    ///
    /// Lets a caller that lists a directory containing `dir` leave the
    /// temporary file out.
    pub fn stage_with<F, I>(
        &self,
        dir: &Path,
        base_dir: &str,
        entries: F,
    ) -> Result<StagedManifest>
    where
        F: FnOnce(PathBuf) -> I,
        I: IntoIterator<Item = ManifestEntry>,
    {
        let file = tempfile::Builder::new()
            .prefix(".medialib-")
            .suffix(".partial")
            .tempfile_in(dir)?;
        make_readable(file.as_file())?;

        let entries = entries(file.path().to_path_buf());
        let mut out = BufWriter::new(file);
        write!(out, "{}{}", base_dir, self.separator)?;

        let mut count = 0;
        for entry in entries {
            write!(out, "{}{}", entry, self.separator)?;
            count += 1;
        }

        let file = out.into_inner().map_err(io::IntoInnerError::into_error)?;
        file.as_file().sync_all()?;

        Ok(StagedManifest {
            file,
            entries: count,
        })
    }

    /// Write a manifest to `destination`, replacing whatever is there.
    ///
    /// Returns the number of entries written.
    pub fn write<I>(&self, base_dir: &str, entries: I, destination: &Path) -> Result<usize>
    where
        I: IntoIterator<Item = ManifestEntry>,
    {
        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let staged = self.stage(dir, base_dir, entries)?;
        let count = staged.entries();
        staged.persist(destination)?;
        Ok(count)
    }
}

// Temporary files are created owner-only
#[cfg(unix)]
fn make_readable(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(MANIFEST_MODE))
}

#[cfg(not(unix))]
fn make_readable(_file: &File) -> io::Result<()> {
    Ok(())
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new("\n")
    }
}

/// A fully written manifest waiting to be moved to its final name.
#[derive(Debug)]
pub struct StagedManifest {
    file: NamedTempFile,
    entries: usize,
}

impl StagedManifest {
    /// Number of entries written.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Temporary location of the content.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Move into place at `destination`, replacing any existing file.
    pub fn persist(self, destination: &Path) -> Result<BuiltManifest> {
        self.file.persist(destination).map_err(|e| e.error)?;
        Ok(BuiltManifest {
            path: destination.to_path_buf(),
            entries: self.entries,
        })
    }

    /// Move into place under a fresh name from `allocator`.
    ///
    /// The move never replaces an existing file. If another writer claims the
    /// allocated name first, a new name is allocated and the move retried.
    pub fn persist_new(
        self,
        allocator: &FilenameAllocator,
        target_dir: &Path,
        file_type: &str,
    ) -> Result<BuiltManifest> {
        let Self { mut file, entries } = self;

        loop {
            let path = allocator.allocate(target_dir, file_type)?;
            match file.persist_noclobber(&path) {
                Ok(_) => return Ok(BuiltManifest { path, entries }),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    debug!("Lost the race for {:?}, allocating again", path);
                    file = e.file;
                }
                Err(e) => return Err(e.error.into()),
            }
        }
    }
}
