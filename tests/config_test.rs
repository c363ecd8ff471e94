// tests/config_test.rs
use pdg::config::{load_config, Config, CONFIG_FILE_NAME};
use pdg::domain::VersionBump;
use serial_test::serial;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// Point the per-user config directory at an empty temp dir so a real
/// `~/.config/pdg/pdg.toml` cannot leak into the test.
fn isolated_user_config() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());
    dir
}

#[test]
#[serial]
fn test_defaults_without_any_file() {
    let _home = isolated_user_config();
    let root = TempDir::new().unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.release.bump(), VersionBump::Patch);
}

#[test]
#[serial]
fn test_project_file_is_picked_up() {
    let _home = isolated_user_config();
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        r#"
app_name = "Ledger"

[release]
default_bump = "minor"
remote = "upstream"
"#,
    )
    .unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.app_name, "Ledger");
    assert_eq!(config.release.bump(), VersionBump::Minor);
    assert_eq!(config.release.remote, "upstream");
    assert_eq!(config.release.notes_preview_chars, 500);
    assert_eq!(config.frontend_dir(root.path()), root.path().join("frontend"));
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_user_config_dir_fallback() {
    let home = isolated_user_config();
    let user_dir = home.path().join("pdg");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(
        user_dir.join(CONFIG_FILE_NAME),
        "[paths]\nbuild_dir = \"out\"\n",
    )
    .unwrap();
    let root = TempDir::new().unwrap();

    let config = load_config(None, root.path()).unwrap();
    assert_eq!(config.build_dir(root.path()), root.path().join("out"));
}

#[test]
fn test_explicit_file_wins() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "app_name = \"Project\"\n").unwrap();

    let mut explicit = NamedTempFile::new().unwrap();
    explicit
        .write_all(b"app_name = \"Explicit\"\n[lint]\ncpp_dirs = [\"engine\"]\n")
        .unwrap();
    explicit.flush().unwrap();

    let config = load_config(Some(explicit.path()), root.path()).unwrap();
    assert_eq!(config.app_name, "Explicit");
    assert_eq!(
        config.lint.cpp_pathspecs(),
        vec![":(glob)engine/**/*.cpp", ":(glob)engine/**/*.h"]
    );
}

#[test]
fn test_explicit_file_missing_is_error() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");
    let err = load_config(Some(&missing), root.path()).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));
}

#[test]
fn test_malformed_file_is_error() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "app_name = [").unwrap();
    assert!(load_config(None, root.path()).is_err());
}
