use medialib_common::{FormatProfile, FormatRegistry, MAIN_PROFILE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::manifest::{FilenameAllocator, DEFAULT_FILE_TYPE, DEFAULT_SALT_LEN};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub library: LibraryConfig,

    /// Custom format profiles: profile name -> family name -> extensions
    #[serde(default)]
    pub profiles: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Where manifests are saved when no directory is given on the command line
    #[serde(default)]
    pub target_dir: Option<PathBuf>,

    /// Format profile used for media libraries
    #[serde(default = "default_profile")]
    pub profile: String,

    /// File type of manifests built with `medialib build`
    #[serde(default = "default_file_type")]
    pub file_type: String,

    /// Entry separator of manifests built with `medialib build`
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Number of random digits in generated manifest names
    #[serde(default = "default_salt_len")]
    pub salt_len: usize,

    /// Suppress per-file progress
    #[serde(default)]
    pub quiet: bool,
}

fn default_profile() -> String {
    MAIN_PROFILE.to_string()
}

fn default_file_type() -> String {
    DEFAULT_FILE_TYPE.to_string()
}

fn default_separator() -> String {
    "\n".to_string()
}

fn default_salt_len() -> usize {
    DEFAULT_SALT_LEN
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            target_dir: None,
            profile: default_profile(),
            file_type: default_file_type(),
            separator: default_separator(),
            salt_len: default_salt_len(),
            quiet: false,
        }
    }
}

impl LibraryConfig {
    /// Configured target directory with `~` expanded.
    pub fn target_dir(&self) -> Option<PathBuf> {
        self.target_dir.as_ref().map(|dir| {
            let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
            PathBuf::from(expanded)
        })
    }
}

impl Config {
    /// Built-in profiles plus the ones declared under `[profiles]`.
    pub fn format_registry(&self) -> medialib_common::Result<FormatRegistry> {
        let mut registry = FormatRegistry::builtin();
        for (name, families) in &self.profiles {
            let mut profile = FormatProfile::new(name.as_str());
            for (family, extensions) in families {
                profile.add_family(family, extensions)?;
            }
            registry.register(profile)?;
        }
        Ok(registry)
    }

    /// Name allocator honoring `library.salt_len`.
    pub fn allocator(&self) -> medialib_common::Result<FilenameAllocator> {
        FilenameAllocator::with_salt_len(self.library.salt_len)
    }
}
