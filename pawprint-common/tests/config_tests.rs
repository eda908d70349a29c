//! Unit tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate PAWPRINT_CONFIG are marked with #[serial].

use pawprint_common::config::{
    load_toml_config, write_toml_config, ConfigResolver, ConfigSource, LoggingConfig, TomlConfig,
    CONFIG_ENV_VAR,
};
use pawprint_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_write_then_load_preserves_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("pawprint-ai.toml");

    let config = TomlConfig {
        logging: LoggingConfig {
            level: "debug".to_string(),
            log_file: Some(PathBuf::from("/tmp/pawprint.log")),
        },
        thresholds_file: Some(PathBuf::from("/etc/pawprint/thresholds.toml")),
        provider_timeout_ms: 2_500,
        cache_ttl_secs: 45,
    };

    write_toml_config(&config, &path).unwrap();
    assert!(path.exists(), "Config should be written (parent created)");
    assert!(
        !path.with_extension("toml.tmp").exists(),
        "Temp file should be renamed away"
    );

    let loaded = load_toml_config(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "provider_timeout_ms = \"soon\"").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_cli_argument_has_priority_over_env() {
    let temp_dir = TempDir::new().unwrap();
    let cli_path = temp_dir.path().join("cli.toml");
    let env_path = temp_dir.path().join("env.toml");
    write_toml_config(
        &TomlConfig {
            cache_ttl_secs: 11,
            ..TomlConfig::default()
        },
        &cli_path,
    )
    .unwrap();
    write_toml_config(
        &TomlConfig {
            cache_ttl_secs: 22,
            ..TomlConfig::default()
        },
        &env_path,
    )
    .unwrap();

    env::set_var(CONFIG_ENV_VAR, &env_path);
    let resolver = ConfigResolver::new("pawprint-ai");
    let (config, source) = resolver.resolve(Some(&cli_path)).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.cache_ttl_secs, 11);
    assert_eq!(source, ConfigSource::CommandLine(cli_path));
}

#[test]
#[serial]
fn test_env_var_used_without_cli_argument() {
    let temp_dir = TempDir::new().unwrap();
    let env_path = temp_dir.path().join("env.toml");
    write_toml_config(
        &TomlConfig {
            provider_timeout_ms: 1_234,
            ..TomlConfig::default()
        },
        &env_path,
    )
    .unwrap();

    env::set_var(CONFIG_ENV_VAR, &env_path);
    let resolver = ConfigResolver::new("pawprint-ai");
    let (config, source) = resolver.resolve(None).unwrap();
    env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.provider_timeout_ms, 1_234);
    assert_eq!(source, ConfigSource::Environment(env_path));
}

#[test]
#[serial]
fn test_named_missing_file_is_fatal() {
    env::remove_var(CONFIG_ENV_VAR);
    let resolver = ConfigResolver::new("pawprint-ai");
    let missing = PathBuf::from("/nonexistent/pawprint/pawprint-ai.toml");

    let result = resolver.resolve(Some(&missing));
    assert!(
        matches!(result, Err(Error::Config(_))),
        "A named config must never silently fall back to defaults"
    );
}

#[test]
#[serial]
fn test_invalid_values_rejected_after_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("zero.toml");
    std::fs::write(&path, "provider_timeout_ms = 0\n").unwrap();

    env::remove_var(CONFIG_ENV_VAR);
    let resolver = ConfigResolver::new("pawprint-ai");
    assert!(resolver.resolve(Some(&path)).is_err());
}
