//! Configuration loading and root folder resolution
//!
//! Tests that touch SODAM_ROOT_FOLDER are marked #[serial] so they do not
//! race on the process environment.

use serial_test::serial;
use sodam_common::config::{
    CompiledDefaults, ConfigOrigin, RootFolderInitializer, RootFolderResolver, TomlConfig,
    ROOT_FOLDER_ENV,
};
use std::env;
use std::path::PathBuf;

#[test]
fn test_compiled_defaults_for_current_platform() {
    let defaults = CompiledDefaults::for_current_platform();

    assert!(!defaults.root_folder.as_os_str().is_empty());
    assert!(defaults.root_folder.to_string_lossy().contains("sodam"));
}

#[test]
fn test_toml_defaults() {
    let config = TomlConfig::default();

    assert_eq!(config.port, 5800);
    assert_eq!(config.bind_address, "127.0.0.1");
    assert_eq!(config.logging.level, "info");
    assert!(config.root_folder.is_none());
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let resolved = RootFolderResolver::new().resolve();

    assert_eq!(resolved, CompiledDefaults::for_current_platform().root_folder);
}

#[test]
#[serial]
fn test_cli_argument_wins_over_env_and_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/sodam-env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/sodam-toml")),
        ..TomlConfig::default()
    };

    let resolved = RootFolderResolver::new()
        .with_cli_arg(Some(PathBuf::from("/tmp/sodam-cli")))
        .with_toml(&config)
        .resolve();

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(resolved, PathBuf::from("/tmp/sodam-cli"));
}

#[test]
#[serial]
fn test_env_wins_over_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/sodam-env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/sodam-toml")),
        ..TomlConfig::default()
    };

    let resolved = RootFolderResolver::new().with_toml(&config).resolve();

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(resolved, PathBuf::from("/tmp/sodam-env"));
}

#[test]
#[serial]
fn test_empty_env_is_ignored() {
    env::set_var(ROOT_FOLDER_ENV, "   ");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/sodam-toml")),
        ..TomlConfig::default()
    };

    let resolved = RootFolderResolver::new().with_toml(&config).resolve();

    env::remove_var(ROOT_FOLDER_ENV);
    assert_eq!(resolved, PathBuf::from("/tmp/sodam-toml"));
}

#[test]
fn test_toml_config_parses_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sodam.toml");
    std::fs::write(&path, "port = 8080\n\n[logging]\nlevel = \"debug\"\n").unwrap();

    let config = TomlConfig::load(&path).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.bind_address, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.file.is_none());
    assert!(config.root_folder.is_none());
}

#[test]
fn test_malformed_toml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    assert!(TomlConfig::load(&path).is_err());

    let (config, origin) = TomlConfig::load_or_default(Some(&path));
    assert_eq!(config.port, 5800);
    assert_eq!(config.logging.level, "info");
    match origin {
        ConfigOrigin::Fallback { path: reported, reason } => {
            assert_eq!(reported, path);
            assert!(reason.contains("broken.toml"));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
}

#[test]
fn test_valid_explicit_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sodam.toml");
    std::fs::write(&path, "bind_address = \"0.0.0.0\"\n").unwrap();

    let (config, origin) = TomlConfig::load_or_default(Some(&path));

    assert_eq!(config.bind_address, "0.0.0.0");
    assert_eq!(origin, ConfigOrigin::File(path));
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, origin) = TomlConfig::load_or_default(Some(&dir.path().join("absent.toml")));

    assert_eq!(config.port, 5800);
    assert!(matches!(origin, ConfigOrigin::Fallback { .. }));
}

#[test]
fn test_initializer_creates_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");

    let initializer = RootFolderInitializer::new(root.clone());
    initializer.ensure_directory_exists().unwrap();

    assert!(root.is_dir());
    assert_eq!(initializer.database_path(), root.join("sodam.db"));
}
