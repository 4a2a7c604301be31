mod cli;

use medialib::{
    builder::LibraryBuilder,
    catalog::ManifestCatalog,
    config::{self, Config},
    manifest::Manifest,
};
use medialib_common::formats::extension_of;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{unescape_separator, Cli, Commands};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on flags
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "medialib=debug,medialib_common=debug".to_string()
        } else {
            "medialib=info,medialib_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let quiet = cli.quiet || config.library.quiet;

    match cli.command {
        Commands::Build {
            base_dir,
            to,
            file_type,
            separator,
            extensions,
        } => {
            let file_type = file_type.unwrap_or_else(|| config.library.file_type.clone());
            let separator = separator
                .map(|s| unescape_separator(&s))
                .unwrap_or_else(|| config.library.separator.clone());
            build(
                &config,
                &base_dir,
                to,
                &file_type,
                &separator,
                &extensions,
                quiet,
            )
        }
        Commands::Media {
            base_dir,
            to,
            profile,
        } => build_media(&config, &base_dir, to, profile.as_deref(), quiet),
        Commands::Latest { dir, kind } => latest(&config, dir, &kind),
        Commands::Show {
            manifest,
            separator,
            json,
        } => show(&manifest, &unescape_separator(&separator), json),
        Commands::Formats { profile } => formats(&config, profile.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("medialib {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Directory to save manifests in: the command line wins over the config.
fn resolve_target(config: &Config, to: Option<PathBuf>) -> Result<PathBuf> {
    let dir = to
        .or_else(|| config.library.target_dir())
        .context("No target directory: pass --to or set library.target_dir")?;

    std::path::absolute(&dir).with_context(|| format!("Cannot resolve {:?}", dir))
}

fn build(
    config: &Config,
    base_dir: &str,
    to: Option<PathBuf>,
    file_type: &str,
    separator: &str,
    extensions: &[String],
    quiet: bool,
) -> Result<()> {
    let target = resolve_target(config, to)?;
    let registry = config.format_registry()?;
    let builder = LibraryBuilder::new(&registry).with_allocator(config.allocator()?);

    let wanted: BTreeSet<String> = extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect();
    let filter = |name: &str| {
        extension_of(name)
            .map(|ext| wanted.contains(&ext))
            .unwrap_or(false)
    };

    let built = if wanted.is_empty() {
        builder.build(base_dir, &target, file_type, None, separator, quiet)?
    } else {
        builder.build(base_dir, &target, file_type, Some(&filter), separator, quiet)?
    };

    println!("{}", built.path.display());
    println!("{} entries", built.entries);
    Ok(())
}

fn build_media(
    config: &Config,
    base_dir: &str,
    to: Option<PathBuf>,
    profile: Option<&str>,
    quiet: bool,
) -> Result<()> {
    let target = resolve_target(config, to)?;
    let registry = config.format_registry()?;
    let profile = profile.unwrap_or(&config.library.profile);

    let built = LibraryBuilder::new(&registry)
        .with_allocator(config.allocator()?)
        .build_media_library(base_dir, &target, profile, quiet)?;

    println!("{}", built.path.display());
    println!("{} entries", built.entries);
    Ok(())
}

fn latest(config: &Config, dir: Option<PathBuf>, kind: &str) -> Result<()> {
    let dir = resolve_target(config, dir)?;
    let catalog = ManifestCatalog::open(&dir)?;

    match catalog.latest(kind) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => anyhow::bail!("No {} manifest found in {:?}", kind, dir),
    }
}

fn show(path: &Path, separator: &str, json: bool) -> Result<()> {
    let manifest = Manifest::load(path, separator)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;

    if json {
        let json_str = serde_json::to_string_pretty(&manifest)?;
        println!("{}", json_str);
    } else {
        println!("Base directory: {}", manifest.base_dir);
        println!("Entries: {}", manifest.len());
        for entry in &manifest.entries {
            println!("  {}", entry);
        }
    }

    Ok(())
}

fn formats(config: &Config, only: Option<&str>) -> Result<()> {
    let registry = config.format_registry()?;
    let names: Vec<&str> = match only {
        Some(name) => vec![registry.profile(name)?.name()],
        None => registry.profile_names().collect(),
    };

    for name in names {
        let profile = registry.profile(name)?;
        println!("{} ({} extensions)", name, profile.extensions().len());
        for (family, extensions) in profile.families() {
            let list: Vec<&str> = extensions.iter().map(String::as_str).collect();
            println!("  {}: {}", family, list.join(" "));
        }
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            match config.library.target_dir() {
                Some(dir) => println!("  Target directory: {}", dir.display()),
                None => println!("  Target directory: (none)"),
            }
            println!("  Profile: {}", config.library.profile);
            println!("  Salt length: {}", config.library.salt_len);
            println!("  Custom profiles: {}", config.profiles.len());
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Profile: {}", config.library.profile);
            println!("  File type: {}", config.library.file_type);
        }
    }

    Ok(())
}
