//! Integration tests for bootstrap configuration
//!
//! Covers config file resolution priority, graceful fallback to defaults,
//! and TOML round trips through the write helper.
//!
//! Note: Uses serial_test to keep tests that touch ALBUMVOTE_CONFIG from
//! racing each other.

use albumvote_common::config::{
    load_or_default, load_toml_config, resolve_config_path, write_toml_config, TomlConfig,
};
use albumvote_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VAR: &str = "ALBUMVOTE_CONFIG";

#[test]
#[serial]
fn test_env_var_used_when_no_cli_arg() {
    env::set_var(ENV_VAR, "/tmp/from-env.toml");

    let path = resolve_config_path(None, ENV_VAR);
    assert_eq!(path, Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var(ENV_VAR);
}

#[test]
#[serial]
fn test_cli_arg_overrides_env_var() {
    env::set_var(ENV_VAR, "/tmp/from-env.toml");

    let cli = PathBuf::from("/tmp/from-cli.toml");
    let path = resolve_config_path(Some(cli.as_path()), ENV_VAR);
    assert_eq!(path, Some(cli));

    env::remove_var(ENV_VAR);
}

#[test]
#[serial]
fn test_blank_env_var_is_ignored() {
    env::set_var(ENV_VAR, "   ");

    let path = resolve_config_path(None, ENV_VAR);
    assert_ne!(path, Some(PathBuf::from("   ")));

    env::remove_var(ENV_VAR);
}

#[test]
fn test_no_config_file_uses_defaults() {
    let config = load_or_default(None).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.toml");

    let result = load_toml_config(&missing);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[server\nport = ").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::TomlParse(_))));
}

#[test]
fn test_invalid_page_size_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, "[catalog]\npage_size = 500\n").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_write_then_load_preserves_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut config = TomlConfig::default();
    config.server.port = 9123;
    config.oauth.client_id = Some("client-abc".to_string());
    config.catalog.max_retries = 0;
    config.logging.level = "debug".to_string();

    write_toml_config(&config, &path).unwrap();
    let loaded = load_toml_config(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_example_config_parses() {
    let config: TomlConfig = toml::from_str(include_str!("../../config.example.toml")).unwrap();
    assert!(config.catalog.validate().is_ok());
    assert_eq!(config.server.static_dir, PathBuf::from("albumvote-server/static"));
    assert!(config.oauth.client_id.is_none());
}
