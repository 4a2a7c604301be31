//! Format registry mapping format families to file extensions.
//!
//! A [`FormatProfile`] groups extensions into named families (`"mp4"` covers
//! `.mp4`, `.m4a` and friends) and keeps the inverse extension → families
//! table. A [`FormatRegistry`] holds the profiles by name. Two profiles are
//! built in: [`FULL_PROFILE`] with broad extension coverage and
//! [`MAIN_PROFILE`] with the canonical extension of each family.

use crate::error::{ConfigurationError, Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Name of the broad built-in profile.
pub const FULL_PROFILE: &str = "full";

/// Name of the narrowed built-in profile.
pub const MAIN_PROFILE: &str = "main";

/// Families of the `full` profile.
const FULL_FAMILIES: &[(&str, &[&str])] = &[
    ("wav", &[".wav", ".wave"]),
    ("mpeg", &[".mp3"]),
    ("mp4", &[".mp4", ".m4a", ".m4p", ".m4b", ".m4r", ".m4v"]),
    ("aac", &[".aac"]),
    ("flac", &[".flac"]),
    ("webm", &[".weba", ".webm"]),
    ("ogg", &[".ogg", ".ogv", ".oga", ".ogx", ".ogm", ".spx", ".opus"]),
];

/// Families of the `main` profile.
const MAIN_FAMILIES: &[(&str, &[&str])] = &[
    ("wav", &[".wav"]),
    ("mpeg", &[".mp3"]),
    ("mp4", &[".mp4"]),
    ("aac", &[".aac"]),
    ("flac", &[".flac"]),
    ("webm", &[".weba", ".webm"]),
    ("ogg", &[".ogg"]),
];

/// Extension of a file name as written, including the leading dot.
///
/// # Examples
///
/// ```
/// use medialib_common::formats::extension_of;
///
/// assert_eq!(extension_of("Track 01.flac").as_deref(), Some(".flac"));
/// assert_eq!(extension_of("Track 01.FLAC").as_deref(), Some(".FLAC"));
/// assert_eq!(extension_of("README"), None);
/// assert_eq!(extension_of(".hidden"), None);
/// ```
pub fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
}

/// A named selection of format families.
#[derive(Debug, Clone)]
pub struct FormatProfile {
    name: String,
    families: BTreeMap<String, BTreeSet<String>>,
    by_extension: BTreeMap<String, Vec<String>>,
    extensions: BTreeSet<String>,
}

impl FormatProfile {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            families: BTreeMap::new(),
            by_extension: BTreeMap::new(),
            extensions: BTreeSet::new(),
        }
    }

    fn from_table(name: &str, table: &[(&str, &[&str])]) -> Self {
        let mut profile = Self::new(name);
        for (family, extensions) in table {
            for extension in *extensions {
                profile.insert(family, extension);
            }
        }
        profile
    }

    /// Add a family, validating that every extension is `.ext` in lower case.
    ///
    /// Adding to an existing family extends it.
    pub fn add_family<I, S>(&mut self, family: &str, extensions: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<S> = extensions.into_iter().collect();
        for extension in &extensions {
            self.validate_extension(extension.as_ref())?;
        }
        for extension in &extensions {
            self.insert(family, extension.as_ref());
        }
        Ok(())
    }

    fn validate_extension(&self, extension: &str) -> Result<()> {
        let reason = if !extension.starts_with('.') {
            "must start with '.'"
        } else if extension.len() < 2 {
            "must name an extension after the '.'"
        } else if extension != extension.to_lowercase() {
            "must be lower-case"
        } else {
            return Ok(());
        };

        Err(ConfigurationError::InvalidExtension {
            profile: self.name.clone(),
            extension: extension.to_string(),
            reason: reason.to_string(),
        }
        .into())
    }

    fn insert(&mut self, family: &str, extension: &str) {
        self.families
            .entry(family.to_string())
            .or_default()
            .insert(extension.to_string());

        let families = self.by_extension.entry(extension.to_string()).or_default();
        if !families.iter().any(|f| f == family) {
            families.push(family.to_string());
        }

        self.extensions.insert(extension.to_string());
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Families and their extensions, ordered by family name.
    pub fn families(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.families.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Union of every family's extensions.
    pub fn extensions(&self) -> &BTreeSet<String> {
        &self.extensions
    }

    /// Families an extension belongs to (empty if unrecognized).
    ///
    /// Lookup is exact: `.MP3` is not `.mp3`.
    pub fn families_for(&self, extension: &str) -> &[String] {
        self.by_extension
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if a file name carries one of this profile's extensions,
    /// compared case-sensitively.
    pub fn matches(&self, file_name: &str) -> bool {
        extension_of(file_name)
            .map(|ext| self.extensions.contains(&ext))
            .unwrap_or(false)
    }
}

/// Profiles by name.
///
/// Built once at startup and handed to whoever needs it; nothing in medialib
/// reaches for a global table.
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    profiles: BTreeMap<String, FormatProfile>,
}

impl FormatRegistry {
    /// Registry holding the `full` and `main` profiles.
    #[must_use]
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            FULL_PROFILE.to_string(),
            FormatProfile::from_table(FULL_PROFILE, FULL_FAMILIES),
        );
        profiles.insert(
            MAIN_PROFILE.to_string(),
            FormatProfile::from_table(MAIN_PROFILE, MAIN_FAMILIES),
        );
        Self { profiles }
    }

    /// Add a custom profile. Built-in profile names are reserved.
    pub fn register(&mut self, profile: FormatProfile) -> Result<()> {
        if is_builtin_profile(profile.name()) {
            return Err(ConfigurationError::ReservedProfile(profile.name().to_string()).into());
        }
        self.profiles.insert(profile.name().to_string(), profile);
        Ok(())
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&FormatProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::unknown_profile(name))
    }

    /// Flattened set of extensions recognized by a profile.
    pub fn extensions_for(&self, name: &str) -> Result<&BTreeSet<String>> {
        self.profile(name).map(FormatProfile::extensions)
    }

    /// Families an extension belongs to within a profile.
    pub fn families_for(&self, name: &str, extension: &str) -> Result<&[String]> {
        self.profile(name).map(|p| p.families_for(extension))
    }

    /// Registered profile names, sorted.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Whether a profile name belongs to a built-in profile.
pub fn is_builtin_profile(name: &str) -> bool {
    name == FULL_PROFILE || name == MAIN_PROFILE
}
