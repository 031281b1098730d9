//! Tests for loading engine configuration from TOML.

use std::fs;
use tempfile::TempDir;

use strictly_minimax::{Player, Pruning};
use strictly_minimax_cli::EngineConfig;

#[test]
fn test_defaults_when_keys_missing() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("engine.toml");
    fs::write(&path, "").expect("Failed to write TOML");

    let config = EngineConfig::from_file(&path).expect("Load failed");
    assert_eq!(config, EngineConfig::default());
    assert!(*config.pruning());
    assert_eq!(*config.human(), Player::X);
    assert_eq!(config.log_filter(), "warn");
}

#[test]
fn test_reads_all_keys() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("engine.toml");
    fs::write(
        &path,
        r#"pruning = false
human = "o"
log_filter = "strictly_minimax=debug"
"#,
    )
    .expect("Failed to write TOML");

    let config = EngineConfig::from_file(&path).expect("Load failed");
    assert!(!*config.pruning());
    assert_eq!(*config.human(), Player::O);
    assert_eq!(config.log_filter(), "strictly_minimax=debug");
    assert_eq!(*config.engine().pruning(), Pruning::Disabled);
}

#[test]
fn test_uppercase_mark_accepted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("engine.toml");
    fs::write(&path, "human = \"O\"\n").expect("Failed to write TOML");

    let config = EngineConfig::from_file(&path).expect("Load failed");
    assert_eq!(*config.human(), Player::O);
}

#[test]
fn test_missing_file_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("absent.toml");
    let err = EngineConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_toml_is_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "human = \"z\"").expect("Failed to write TOML");

    let err = EngineConfig::from_file(&path).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
    assert!(err.to_string().starts_with("Config error:"));
}

#[test]
fn test_overrides_win_over_file() {
    let config = EngineConfig::default().with_overrides(true, Some(Player::O));
    assert!(!*config.pruning());
    assert_eq!(*config.human(), Player::O);
    assert_eq!(*config.engine().pruning(), Pruning::Disabled);

    let untouched = EngineConfig::default().with_overrides(false, None);
    assert_eq!(untouched, EngineConfig::default());
}
