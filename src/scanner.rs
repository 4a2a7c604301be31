//! Recursive directory listing.
//!
//! [`DirectoryScanner`] walks a directory tree lazily and yields the path of
//! every file relative to the root it was started from. Directories are
//! never yielded. The order is whatever the filesystem lists; every matching
//! file shows up exactly once.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Predicate over a bare file name deciding whether the file is listed.
pub type FileFilter<'a> = &'a dyn Fn(&str) -> bool;

/// Lazy, non-restartable iterator over the files below a root directory.
pub struct DirectoryScanner<'a> {
    root: PathBuf,
    walker: walkdir::IntoIter,
    filter: Option<FileFilter<'a>>,
}

impl<'a> DirectoryScanner<'a> {
    /// Start scanning `root`. With no filter every file matches.
    pub fn new(root: impl AsRef<Path>, filter: Option<FileFilter<'a>>) -> Self {
        let root = root.as_ref().to_path_buf();
        let walker = WalkDir::new(&root)
            .min_depth(1)
            .follow_links(false)
            .into_iter();

        Self {
            root,
            walker,
            filter,
        }
    }

    /// Root the yielded paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Iterator for DirectoryScanner<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    continue;
                }
            };

            // Symlinked directories are neither listed nor descended into
            let file_type = entry.file_type();
            if file_type.is_dir() || (file_type.is_symlink() && entry.path().is_dir()) {
                continue;
            }

            // A manifest records text, so a lossy name would point nowhere
            let Some(relative) = entry
                .path()
                .strip_prefix(&self.root)
                .ok()
                .and_then(Path::to_str)
            else {
                warn!("Skipping {:?}: path is not valid UTF-8", entry.path());
                continue;
            };

            if let Some(filter) = self.filter {
                let name = entry.file_name().to_str().unwrap_or(relative);
                if !filter(name) {
                    continue;
                }
            }

            return Some(relative.to_string());
        }
    }
}

/// Scan `root` for files accepted by `filter`.
pub fn scan<'a>(root: impl AsRef<Path>, filter: Option<FileFilter<'a>>) -> DirectoryScanner<'a> {
    DirectoryScanner::new(root, filter)
}
