//! Building library manifests from a directory tree.
//!
//! [`LibraryBuilder::build`] validates its inputs, scans the base directory,
//! numbers every matching file in discovery order and saves the result under
//! a freshly allocated name in the target directory.

use crate::manifest::{BuiltManifest, FilenameAllocator, ManifestEntry, ManifestWriter};
use crate::scanner::{DirectoryScanner, FileFilter};
use medialib_common::{Error, FormatRegistry, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// File type of media library manifests.
pub const MEDIA_FILE_TYPE: &str = "mlib";

/// Entry separator of media library manifests.
pub const MEDIA_SEPARATOR: &str = "\n";

/// Builds manifests using a format registry and a name allocator.
pub struct LibraryBuilder<'r> {
    registry: &'r FormatRegistry,
    allocator: FilenameAllocator,
}

impl<'r> LibraryBuilder<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self {
            registry,
            allocator: FilenameAllocator::new(),
        }
    }

    /// Use a differently configured allocator.
    pub fn with_allocator(mut self, allocator: FilenameAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn registry(&self) -> &FormatRegistry {
        self.registry
    }

    /// Build a manifest of the files under `base_dir` accepted by `filter`.
    ///
    /// `base_dir` must exist and `target_dir` must be an absolute path to an
    /// existing directory; both are checked before anything is written. The
    /// first record of the manifest is `base_dir` exactly as given. Unless
    /// `quiet`, the base directory and every discovered file are logged.
    pub fn build(
        &self,
        base_dir: &str,
        target_dir: &Path,
        file_type: &str,
        filter: Option<FileFilter<'_>>,
        separator: &str,
        quiet: bool,
    ) -> Result<BuiltManifest> {
        if !Path::new(base_dir).exists() {
            return Err(Error::path_not_found(base_dir));
        }
        self.allocator.check_target(target_dir)?;

        if !quiet {
            info!("building library from {}", base_dir);
        }

        // The target may lie inside the base directory, in which case the
        // scan would otherwise come across the manifest being written
        let writer = ManifestWriter::new(separator);
        let staged = writer.stage_with(target_dir, base_dir, |staging| {
            DirectoryScanner::new(base_dir, filter)
                .filter(move |relative| {
                    let own = is_staging_file(Path::new(base_dir), relative, &staging);
                    if own {
                        debug!("Skipping {} (manifest being written)", relative);
                    }
                    !own
                })
                .enumerate()
                .map(move |(index, relative_path)| {
                    let entry = ManifestEntry::new(index, relative_path);
                    if !quiet {
                        info!("+ discovered {}", entry);
                    }
                    entry
                })
        })?;
        let built = staged.persist_new(&self.allocator, target_dir, file_type)?;

        debug!("Saved {} entries to {:?}", built.entries, built.path);
        Ok(built)
    }

    /// Build a media library manifest (`.mlib`, newline separated) of the
    /// files recognized by a format profile.
    pub fn build_media_library(
        &self,
        base_dir: &str,
        target_dir: &Path,
        profile: &str,
        quiet: bool,
    ) -> Result<BuiltManifest> {
        let profile = self.registry.profile(profile)?;
        let filter = |name: &str| profile.matches(name);

        self.build(
            base_dir,
            target_dir,
            MEDIA_FILE_TYPE,
            Some(&filter),
            MEDIA_SEPARATOR,
            quiet,
        )
    }
}

/// Whether `relative` below `base_dir` is the file at `staging`.
fn is_staging_file(base_dir: &Path, relative: &str, staging: &Path) -> bool {
    let candidate = base_dir.join(relative);
    if candidate.file_name() != staging.file_name() {
        return false;
    }
    match (fs::canonicalize(&candidate), fs::canonicalize(staging)) {
        (Ok(candidate), Ok(staging)) => candidate == staging,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use assert_matches::assert_matches;
    use medialib_common::{ConfigurationError, MAIN_PROFILE};
    use tempfile::tempdir;

    #[test]
    fn test_build_all_files() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        fs::write(base.path().join("a.txt"), "").unwrap();
        fs::create_dir(base.path().join("sub")).unwrap();
        fs::write(base.path().join("sub/b.bin"), "").unwrap();

        let registry = FormatRegistry::builtin();
        let base_dir = base.path().to_str().unwrap();
        let built = LibraryBuilder::new(&registry)
            .build(base_dir, target.path(), "", None, "\n", true)
            .unwrap();

        assert_eq!(built.entries, 2);
        assert!(built.path.to_string_lossy().ends_with(".lib"));

        let manifest = Manifest::load(&built.path, "\n").unwrap();
        assert_eq!(manifest.base_dir, base_dir);
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_build_media_library_unknown_profile() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        let registry = FormatRegistry::builtin();

        let result = LibraryBuilder::new(&registry).build_media_library(
            base.path().to_str().unwrap(),
            target.path(),
            "lossless",
            true,
        );
        assert_matches!(
            result,
            Err(Error::Configuration(ConfigurationError::UnknownProfile(_)))
        );
        assert_eq!(fs::read_dir(target.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_build_relative_target_rejected() {
        let base = tempdir().unwrap();
        let registry = FormatRegistry::builtin();

        let result = LibraryBuilder::new(&registry).build_media_library(
            base.path().to_str().unwrap(),
            Path::new("relative/target"),
            MAIN_PROFILE,
            true,
        );
        assert_matches!(
            result,
            Err(Error::Configuration(ConfigurationError::InvalidTargetDirectory { .. }))
        );
    }

    #[test]
    fn test_staging_file_detection() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("lib")).unwrap();
        let staging = dir.path().join("lib/.medialib-abc.partial");
        fs::write(&staging, "").unwrap();
        fs::write(dir.path().join(".medialib-abc.partial"), "").unwrap();

        assert!(is_staging_file(dir.path(), "lib/.medialib-abc.partial", &staging));
        let dotted = dir.path().join("lib/..");
        assert!(is_staging_file(&dotted, "lib/.medialib-abc.partial", &staging));
        assert!(!is_staging_file(dir.path(), ".medialib-abc.partial", &staging));
        assert!(!is_staging_file(dir.path(), "lib/other.mp3", &staging));
    }

    #[test]
    fn test_build_empty_directory_yields_header_only() {
        let base = tempdir().unwrap();
        let target = tempdir().unwrap();
        let registry = FormatRegistry::builtin();
        let base_dir = base.path().to_str().unwrap();

        let built = LibraryBuilder::new(&registry)
            .build_media_library(base_dir, target.path(), MAIN_PROFILE, false)
            .unwrap();

        assert_eq!(built.entries, 0);
        assert_eq!(
            fs::read_to_string(&built.path).unwrap(),
            format!("{base_dir}\n")
        );
    }
}
