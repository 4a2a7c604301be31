//! Collision-free manifest file names.
//!
//! Names look like `<nanosecond timestamp>_<salt>.<file type>`, where the salt
//! is a run of distinct random decimal digits.

use medialib_common::{ConfigurationError, Error, Result};
use rand::seq::index;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Number of salt digits unless configured otherwise.
pub const DEFAULT_SALT_LEN: usize = 2;

/// Salt digits are distinct, so there can be at most ten of them.
pub const MAX_SALT_LEN: usize = 10;

/// Extension used when none is given.
pub const DEFAULT_FILE_TYPE: &str = "lib";

/// Source of the timestamp part of a name, in nanoseconds.
pub type Clock = fn() -> i64;

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

/// Picks unused manifest file names inside a target directory.
#[derive(Debug, Clone, Copy)]
pub struct FilenameAllocator {
    salt_len: usize,
    clock: Clock,
}

impl FilenameAllocator {
    /// Allocator with the default two-digit salt.
    pub fn new() -> Self {
        Self {
            salt_len: DEFAULT_SALT_LEN,
            clock: now_nanos,
        }
    }

    /// Allocator with a custom salt length in `1..=10`.
    pub fn with_salt_len(salt_len: usize) -> Result<Self> {
        if !(1..=MAX_SALT_LEN).contains(&salt_len) {
            return Err(ConfigurationError::InvalidSaltLength(salt_len).into());
        }
        Ok(Self {
            salt_len,
            ..Self::new()
        })
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn salt_len(&self) -> usize {
        self.salt_len
    }

    /// Check that `target_dir` is an absolute path to an existing directory.
    pub fn check_target(&self, target_dir: &Path) -> Result<()> {
        if !target_dir.is_absolute() {
            return Err(Error::invalid_target(target_dir, "not an absolute path"));
        }
        if !target_dir.is_dir() {
            return Err(Error::invalid_target(target_dir, "not a directory"));
        }
        Ok(())
    }

    /// Generate a file name without looking at the filesystem.
    pub fn file_name(&self, file_type: &str) -> String {
        let file_type = match file_type.trim_start_matches('.') {
            "" => DEFAULT_FILE_TYPE,
            ext => ext,
        };

        let salt: String = index::sample(&mut rand::thread_rng(), 10, self.salt_len)
            .iter()
            .map(|digit| char::from(b'0' + digit as u8))
            .collect();

        format!("{}_{}.{}", (self.clock)(), salt, file_type)
    }

    /// Return a path inside `target_dir` that does not exist yet.
    ///
    /// The target is validated once, then names are generated until one is
    /// free. Nothing is created; the caller must still claim the path
    /// exclusively (see [`StagedManifest::persist_new`]).
    ///
    /// [`StagedManifest::persist_new`]: super::StagedManifest::persist_new
    pub fn allocate(&self, target_dir: &Path, file_type: &str) -> Result<PathBuf> {
        self.check_target(target_dir)?;

        loop {
            let candidate = target_dir.join(self.file_name(file_type));
            if !candidate.exists() {
                return Ok(candidate);
            }
            debug!("Manifest name {:?} is taken, retrying", candidate);
        }
    }
}

impl Default for FilenameAllocator {
    fn default() -> Self {
        Self::new()
    }
}
