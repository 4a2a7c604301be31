//! Medialib-Common: shared error type and format registry.
//!
//! - **Error Handling**: [`Error`], [`ConfigurationError`] and the [`Result`] alias
//! - **Formats**: [`FormatRegistry`] with the built-in `full` and `main` profiles
//!
//! # Examples
//!
//! ```
//! use medialib_common::{FormatRegistry, MAIN_PROFILE};
//!
//! let registry = FormatRegistry::builtin();
//! let main = registry.profile(MAIN_PROFILE)?;
//! assert!(main.matches("track.flac"));
//! assert!(!main.matches("cover.jpg"));
//! # Ok::<(), medialib_common::Error>(())
//! ```

pub mod error;
pub mod formats;

pub use error::{ConfigurationError, Error, Result};
pub use formats::{FormatProfile, FormatRegistry, FULL_PROFILE, MAIN_PROFILE};
