//! Integration tests for reading manifests back and picking the newest one.

mod common;

use common::{MediaTree, MAIN_FILES};
use medialib::manifest::FilenameAllocator;
use medialib::{FormatRegistry, LibraryBuilder, Manifest, ManifestCatalog};
use medialib_common::MAIN_PROFILE;

#[test]
fn latest_manifest_is_the_newest_build() {
    fn early() -> i64 {
        1_000
    }
    fn late() -> i64 {
        2_000
    }

    let tree = MediaTree::with_files(MAIN_FILES);
    let registry = FormatRegistry::builtin();

    let old = LibraryBuilder::new(&registry)
        .with_allocator(FilenameAllocator::new().with_clock(early))
        .build_media_library(tree.base_dir(), tree.target_dir(), MAIN_PROFILE, true)
        .unwrap();
    let new = LibraryBuilder::new(&registry)
        .with_allocator(FilenameAllocator::new().with_clock(late))
        .build_media_library(tree.base_dir(), tree.target_dir(), MAIN_PROFILE, true)
        .unwrap();

    let catalog = ManifestCatalog::open(tree.target_dir()).unwrap();
    assert_eq!(catalog.manifests("mlib").len(), 2);
    assert_eq!(catalog.latest("mlib"), Some(new.path.as_path()));
    assert_ne!(catalog.latest("mlib"), Some(old.path.as_path()));
}

#[test]
fn built_entries_resolve_to_existing_files() {
    let tree = MediaTree::with_files(MAIN_FILES);
    let registry = FormatRegistry::builtin();

    let built = LibraryBuilder::new(&registry)
        .build_media_library(tree.base_dir(), tree.target_dir(), MAIN_PROFILE, true)
        .unwrap();

    let manifest = Manifest::load(&built.path, "\n").unwrap();
    assert_eq!(manifest.base_dir, tree.base_dir());
    assert_eq!(manifest.len(), built.entries);

    for entry in &manifest.entries {
        let path = manifest.resolve(entry.index).unwrap();
        assert!(path.is_file());
        assert!(path.starts_with(tree.base.path()));
    }
}

#[test]
fn catalog_ignores_staging_files() {
    let tree = MediaTree::new();
    std::fs::write(tree.target_dir().join(".medialib-x1y2.partial"), "").unwrap();

    let catalog = ManifestCatalog::open(tree.target_dir()).unwrap();
    assert_eq!(catalog.kinds().count(), 0);
    assert_eq!(catalog.latest("mlib"), None);
}
