//! Unit tests for configuration resolution and graceful degradation
//!
//! Tests cover:
//! - Priority order: CLI > environment > TOML > compiled defaults
//! - Missing TOML files do not cause errors
//! - Malformed TOML files are reported as configuration errors
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that read or manipulate CINEDASH_* variables are marked with #[serial].

use cinedash_common::config::{
    load_toml_config, CompiledDefaults, ConfigOverrides, DashboardConfig, LoggingConfig,
    TomlConfig, ENV_DATABASE_URL, ENV_HOST, ENV_PORT,
};
use cinedash_common::Error;
use serial_test::serial;
use std::env;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var(ENV_DATABASE_URL);
    env::remove_var(ENV_HOST);
    env::remove_var(ENV_PORT);
}

fn toml_with_url(url: &str) -> TomlConfig {
    TomlConfig {
        database_url: Some(url.to_string()),
        host: Some("0.0.0.0".to_string()),
        port: Some(9000),
        logging: LoggingConfig {
            level: Some("debug".to_string()),
        },
    }
}

#[test]
#[serial]
fn test_defaults_when_nothing_configured() {
    clear_env();

    let config = DashboardConfig::resolve_with(
        ConfigOverrides::default(),
        TomlConfig::default(),
        CompiledDefaults::default(),
    )
    .unwrap();

    assert_eq!(config.database_url, "sqlite://movies.db");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8501);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.listen_addr(), "127.0.0.1:8501");
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();

    let config = DashboardConfig::resolve_with(
        ConfigOverrides::default(),
        toml_with_url("sqlite:///srv/imdb.db"),
        CompiledDefaults::default(),
    )
    .unwrap();

    assert_eq!(config.database_url, "sqlite:///srv/imdb.db");
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9000);
    assert_eq!(config.log_level, "debug");
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    env::set_var(ENV_DATABASE_URL, "sqlite:///tmp/from-env.db");
    env::set_var(ENV_PORT, "7000");

    let config = DashboardConfig::resolve_with(
        ConfigOverrides::default(),
        toml_with_url("sqlite:///srv/imdb.db"),
        CompiledDefaults::default(),
    )
    .unwrap();

    assert_eq!(config.database_url, "sqlite:///tmp/from-env.db");
    assert_eq!(config.port, 7000);
    // Host not set in env: TOML value remains
    assert_eq!(config.host, "0.0.0.0");

    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var(ENV_DATABASE_URL, "sqlite:///tmp/from-env.db");

    let overrides = ConfigOverrides {
        database_url: Some("sqlite:///tmp/from-cli.db".to_string()),
        port: Some(6000),
        ..Default::default()
    };

    let config =
        DashboardConfig::resolve_with(overrides, TomlConfig::default(), CompiledDefaults::default())
            .unwrap();

    assert_eq!(config.database_url, "sqlite:///tmp/from-cli.db");
    assert_eq!(config.port, 6000);

    clear_env();
}

#[test]
#[serial]
fn test_invalid_port_env_is_config_error() {
    clear_env();
    env::set_var(ENV_PORT, "not-a-port");

    let result = DashboardConfig::resolve_with(
        ConfigOverrides::default(),
        TomlConfig::default(),
        CompiledDefaults::default(),
    );

    assert!(matches!(result, Err(Error::Config(_))));

    clear_env();
}

#[test]
#[serial]
fn test_empty_database_url_rejected() {
    clear_env();

    let overrides = ConfigOverrides {
        database_url: Some("   ".to_string()),
        ..Default::default()
    };

    let result = DashboardConfig::resolve_with(
        overrides,
        TomlConfig::default(),
        CompiledDefaults::default(),
    );
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_config_file_does_not_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");

    let loaded = load_toml_config(&path).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn test_config_file_parsed() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        database_url = "sqlite:///data/imdb.db"
        port = 8600
        [logging]
        level = "warn"
    "#,
    )
    .unwrap();

    let loaded = load_toml_config(&path).unwrap().unwrap();
    assert_eq!(loaded.database_url.as_deref(), Some("sqlite:///data/imdb.db"));
    assert_eq!(loaded.port, Some(8600));
    assert_eq!(loaded.host, None);
    assert_eq!(loaded.logging.level.as_deref(), Some("warn"));
}

#[test]
fn test_malformed_config_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "port = \"eighty\"").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_resolve_with_explicit_missing_path_uses_defaults() {
    clear_env();
    let temp_dir = TempDir::new().unwrap();

    let overrides = ConfigOverrides {
        config_path: Some(temp_dir.path().join("nope.toml")),
        ..Default::default()
    };

    let config = DashboardConfig::resolve(overrides).unwrap();
    assert_eq!(config, DashboardConfig {
        database_url: "sqlite://movies.db".to_string(),
        host: "127.0.0.1".to_string(),
        port: 8501,
        log_level: "info".to_string(),
    });
}
