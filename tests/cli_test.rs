//! Binary-level tests: argument parsing, exit codes and the dry-run release.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn pdg_cmd(config_home: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("pdg"));
    cmd.env_remove("PDG_ROOT")
        .env_remove("PDG_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("GIT_CEILING_DIRECTORIES", std::env::temp_dir());
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    pdg_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn test_release_help() {
    let home = TempDir::new().unwrap();
    pdg_cmd(&home)
        .args(["release", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--skip-checks"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    pdg_cmd(&home).arg("package").assert().failure().code(2);
}

#[test]
fn test_invalid_explicit_version_fails() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    pdg_cmd(&home)
        .arg("--root")
        .arg(root.path())
        .args(["release", "1.2", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_dry_run_release_outside_git() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();

    pdg_cmd(&home)
        .arg("--root")
        .arg(root.path())
        .args(["r", "--dry-run", "--draft"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating Release v1.0.0"))
        .stdout(predicate::str::contains("## v1.0.0"))
        .stdout(predicate::str::contains("gh release create v1.0.0 --draft"))
        .stderr(predicate::str::contains("No existing tags found"));

    assert!(!root.path().join("RELEASE_NOTES_v1.0.0.md").exists());
}

#[test]
fn test_config_remote_used_in_commands() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join("pdg.toml"),
        "[release]\nremote = \"upstream\"\n",
    )
    .unwrap();

    pdg_cmd(&home)
        .arg("--root")
        .arg(root.path())
        .args(["release", "v3.1.4", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git push upstream v3.1.4"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let root = TempDir::new().unwrap();
    pdg_cmd(&home)
        .arg("--root")
        .arg(root.path())
        .arg("--config")
        .arg(root.path().join("absent.toml"))
        .args(["release", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}
