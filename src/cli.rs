use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "medialib")]
#[command(author, version, about = "Media library manifest builder")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not report discovered files
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a manifest of every file under a directory
    Build {
        /// Directory to scan
        #[arg(required = true)]
        base_dir: String,

        /// Directory to save the manifest in
        #[arg(short, long)]
        to: Option<PathBuf>,

        /// Manifest file extension (defaults to the configured file type)
        #[arg(long)]
        file_type: Option<String>,

        /// Entry separator; accepts \n, \t and \0 escapes
        #[arg(long)]
        separator: Option<String>,

        /// Only list files with these extensions, matched exactly (repeatable)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Build a media library manifest using a format profile
    Media {
        /// Directory to scan
        #[arg(required = true)]
        base_dir: String,

        /// Directory to save the manifest in
        #[arg(short, long)]
        to: Option<PathBuf>,

        /// Format profile (defaults to the configured profile)
        #[arg(short, long)]
        profile: Option<String>,
    },

    /// Print the newest manifest of a kind
    Latest {
        /// Directory holding manifests (defaults to the configured target)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Manifest kind, i.e. its file extension
        #[arg(short, long, default_value = "mlib")]
        kind: String,
    },

    /// List the entries of a manifest
    Show {
        /// Manifest file
        #[arg(required = true)]
        manifest: PathBuf,

        /// Entry separator; accepts \n, \t and \0 escapes
        #[arg(long, default_value = "\\n")]
        separator: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List format profiles and their extensions
    Formats {
        /// Only show this profile
        profile: Option<String>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

/// Turn `\n`, `\t`, `\0` and `\\` escapes typed on a shell into characters.
pub fn unescape_separator(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
