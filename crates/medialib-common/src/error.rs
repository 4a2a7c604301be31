//! Common error types used throughout medialib.
//!
//! Every precondition failure of a build is a [`ConfigurationError`]; these
//! are raised before any file is written. Everything else is either an I/O
//! failure or a problem reading back an existing manifest.

use std::path::PathBuf;

/// A build or lookup was requested with inputs that can never succeed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The directory to scan does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    /// The directory to save a manifest in is unusable.
    #[error("invalid target directory {}: {reason}", path.display())]
    InvalidTargetDirectory { path: PathBuf, reason: String },

    /// No format profile is registered under this name.
    #[error("unknown format profile: {0}")]
    UnknownProfile(String),

    /// An extension is not of the form `.ext` in lower case.
    #[error("invalid extension {extension:?} in profile {profile}: {reason}")]
    InvalidExtension {
        profile: String,
        extension: String,
        reason: String,
    },

    /// A built-in profile name was reused for a custom profile.
    #[error("format profile {0} is built in and cannot be replaced")]
    ReservedProfile(String),

    /// The salt length cannot produce distinct decimal digits.
    #[error("invalid salt length {0}: must be between 1 and 10")]
    InvalidSaltLength(usize),

    /// The directory to list manifests from does not exist.
    #[error("manifest directory not found: {}", path.display())]
    CatalogNotFound { path: PathBuf },
}

/// Common error type for medialib.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Inputs failed validation.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A manifest file could not be interpreted.
    #[error("malformed manifest {}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    /// A manifest has no entry with this index.
    #[error("no entry with index {index}")]
    EntryNotFound { index: usize },
}

impl Error {
    /// Create a PathNotFound configuration error.
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigurationError::PathNotFound { path: path.into() }.into()
    }

    /// Create an InvalidTargetDirectory configuration error.
    pub fn invalid_target(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConfigurationError::InvalidTargetDirectory {
            path: path.into(),
            reason: reason.into(),
        }
        .into()
    }

    /// Create an UnknownProfile configuration error.
    pub fn unknown_profile(name: impl Into<String>) -> Self {
        ConfigurationError::UnknownProfile(name.into()).into()
    }

    /// Create a MalformedManifest error.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedManifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a precondition failure rather than a runtime one.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
