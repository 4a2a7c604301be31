//! CLI end-to-end tests
//!
//! Tests for the medialib command-line interface.

mod common;

use assert_cmd::prelude::*;
use common::{MediaTree, MAIN_FILES};
use predicates::prelude::*;
use std::fs;
use std::process::Command;

/// Get a command for the medialib binary, isolated from any user config
#[allow(deprecated)]
fn medialib_cmd() -> Command {
    let mut cmd = Command::cargo_bin("medialib").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn manifest_path(stdout: &[u8]) -> std::path::PathBuf {
    let stdout = String::from_utf8_lossy(stdout);
    stdout.lines().next().unwrap().into()
}

#[test]
fn test_cli_no_args_shows_help() {
    medialib_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    medialib_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("medialib"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    medialib_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("medialib "));
}

#[test]
fn test_cli_media_builds_manifest() {
    let tree = MediaTree::with_files(MAIN_FILES);
    tree.add("notes.txt");

    let output = medialib_cmd()
        .args(["--quiet", "media", tree.base_dir(), "--to"])
        .arg(tree.target_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("8 entries"))
        .get_output()
        .stdout
        .clone();

    let path = manifest_path(&output);
    assert_eq!(path.extension().unwrap(), "mlib");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!("{}\n", tree.base_dir())));
    assert!(!content.contains("notes.txt"));
}

#[test]
fn test_cli_media_reports_progress() {
    let tree = MediaTree::with_files(&["only.flac"]);

    medialib_cmd()
        .args(["media", tree.base_dir(), "--to"])
        .arg(tree.target_dir())
        .assert()
        .success()
        .stderr(predicate::str::contains("building library from"))
        .stderr(predicate::str::contains("+ discovered 0 only.flac"));
}

#[test]
fn test_cli_build_with_extension_filter_and_separator() {
    let tree = MediaTree::with_files(&["a.txt", "b.md", "c.mp3"]);

    let output = medialib_cmd()
        .args(["-q", "build", tree.base_dir(), "--ext", "txt", "--ext", ".md"])
        .args(["--separator", "\\t", "--file-type", "doclib", "--to"])
        .arg(tree.target_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"))
        .get_output()
        .stdout
        .clone();

    let path = manifest_path(&output);
    assert_eq!(path.extension().unwrap(), "doclib");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&format!("{}\t", tree.base_dir())));
    assert!(!content.contains("c.mp3"));
    assert!(!content.contains('\n'));
}

#[test]
fn test_cli_missing_base_dir_fails() {
    let tree = MediaTree::new();

    medialib_cmd()
        .args(["media", "/definitely/not/here", "--to"])
        .arg(tree.target_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("path not found"));

    assert!(tree.target_files().is_empty());
}

#[test]
fn test_cli_latest_and_show() {
    let tree = MediaTree::with_files(&["a.mp3", "b.ogg"]);

    let output = medialib_cmd()
        .args(["-q", "media", tree.base_dir(), "--to"])
        .arg(tree.target_dir())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let built = manifest_path(&output);

    medialib_cmd()
        .args(["latest", "--dir"])
        .arg(tree.target_dir())
        .assert()
        .success()
        .stdout(predicate::str::contains(built.to_string_lossy().as_ref()));

    medialib_cmd()
        .arg("show")
        .arg(&built)
        .assert()
        .success()
        .stdout(predicate::str::contains("Entries: 2"));

    medialib_cmd()
        .args(["show", "--json"])
        .arg(&built)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"relative_path\""));
}

#[test]
fn test_cli_latest_without_manifests_fails() {
    let tree = MediaTree::new();

    medialib_cmd()
        .args(["latest", "--dir"])
        .arg(tree.target_dir())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No mlib manifest found"));
}

#[test]
fn test_cli_formats() {
    medialib_cmd()
        .args(["formats", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main (8 extensions)"))
        .stdout(predicate::str::contains("webm: .weba .webm"));

    medialib_cmd()
        .args(["formats", "lossless"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format profile"));
}

#[test]
fn test_cli_config_target_dir_and_profile() {
    let tree = MediaTree::with_files(&["a.mp3", "b.m4a"]);
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("medialib.toml");
    fs::write(
        &config_path,
        format!(
            "[library]\ntarget_dir = {:?}\nprofile = \"full\"\nquiet = true\n",
            tree.target_dir().to_str().unwrap()
        ),
    )
    .unwrap();

    medialib_cmd()
        .arg("--config")
        .arg(&config_path)
        .args(["media", tree.base_dir()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"));

    assert_eq!(tree.target_files().len(), 1);
}

#[test]
fn test_cli_validate_rejects_bad_config() {
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("bad.toml");
    fs::write(&config_path, "[library]\nsalt_len = 0\n").unwrap();

    medialib_cmd()
        .arg("validate")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("salt_len"));
}
