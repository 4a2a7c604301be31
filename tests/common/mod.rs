//! Shared fixtures for integration tests.
//!
//! [`MediaTree`] lays out a throwaway directory of empty media files and a
//! separate directory to save manifests in.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One file per extension of the `main` format profile.
pub const MAIN_FILES: &[&str] = &[
    "a.wav",
    "b.mp3",
    "albums/c.mp4",
    "albums/d.aac",
    "albums/2019/e.flac",
    "albums/2019/f.webm",
    "clips/g.weba",
    "clips/deep/er/h.ogg",
];

/// A media directory plus a target directory for manifests.
pub struct MediaTree {
    pub base: TempDir,
    pub target: TempDir,
}

impl MediaTree {
    /// Empty base and target directories.
    pub fn new() -> Self {
        Self {
            base: TempDir::new().expect("failed to create base dir"),
            target: TempDir::new().expect("failed to create target dir"),
        }
    }

    /// Base directory holding `files`.
    pub fn with_files(files: &[&str]) -> Self {
        let tree = Self::new();
        for file in files {
            tree.add(file);
        }
        tree
    }

    /// Create an empty file below the base directory.
    pub fn add(&self, relative: &str) -> PathBuf {
        let path = self.base.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    pub fn base_dir(&self) -> &str {
        self.base.path().to_str().expect("temp dir is not UTF-8")
    }

    pub fn target_dir(&self) -> &Path {
        self.target.path()
    }

    /// Files currently in the target directory.
    pub fn target_files(&self) -> Vec<PathBuf> {
        fs::read_dir(self.target.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }
}

/// Split a manifest into its header and entry records.
pub fn read_records(path: &Path, separator: &str) -> (String, Vec<String>) {
    let content = fs::read_to_string(path).unwrap();
    assert!(content.ends_with(separator), "unterminated manifest");
    let mut records: Vec<String> = content.split(separator).map(str::to_string).collect();
    // Trailing separator leaves an empty last piece
    records.pop();
    let header = records.remove(0);
    (header, records)
}
