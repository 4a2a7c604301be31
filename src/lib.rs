//! Medialib - library manifest builder
//!
//! Scans a directory tree, keeps the files a format profile recognizes,
//! numbers them in discovery order and saves the list as a flat manifest
//! under a collision-free generated name. This library crate exposes the
//! core functionality for the `medialib` binary and integration testing.

pub mod builder;
pub mod catalog;
pub mod config;
pub mod manifest;
pub mod scanner;

pub use builder::LibraryBuilder;
pub use catalog::ManifestCatalog;
pub use manifest::{BuiltManifest, Manifest, ManifestEntry};
pub use medialib_common::{ConfigurationError, Error, FormatRegistry, Result};
