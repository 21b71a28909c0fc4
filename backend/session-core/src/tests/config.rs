// Unit tests for configuration loading, validation and environment overrides.

use crate::DEFAULT_API_BASE_URL;
use crate::config::{API_BASE_URL_ENV, ClientConfig};
use crate::error::ConfigError;

use std::time::Duration;

use serial_test::serial;
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &str) {
    std::fs::write(dir.path().join("config.toml"), contents).unwrap();
}

#[test]
fn given_no_config_file_when_load_then_defaults_returned() {
    // GIVEN: An empty directory
    let dir = TempDir::new().unwrap();

    // WHEN: Loading
    let config = ClientConfig::load(dir.path()).unwrap();

    // THEN: Defaults
    assert_eq!(config, ClientConfig::default());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.timeout(), Duration::from_secs(30));
}

#[test]
fn given_partial_config_file_when_load_then_missing_fields_defaulted() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "api_base_url = \"http://localhost:8080/api\"\n");

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.api_base_url, "http://localhost:8080/api");
    assert_eq!(config.version, 1);
    assert_eq!(config.timeout_secs, 30);
}

/// **VALUE**: Verifies that a corrupt config file is an error, not silently replaced by defaults.
///
/// **WHY THIS MATTERS**: Falling back to the placeholder backend would send the user's
/// password to the wrong host.
#[test]
fn given_malformed_toml_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "api_base_url = [not toml");

    let result = ClientConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn given_invalid_values_when_validate_then_validation_error() {
    let cases = [
        ClientConfig {
            version: 0,
            ..ClientConfig::default()
        },
        ClientConfig {
            version: 2,
            ..ClientConfig::default()
        },
        ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        },
        ClientConfig {
            timeout_secs: 301,
            ..ClientConfig::default()
        },
        ClientConfig {
            api_base_url: "not a url".to_string(),
            ..ClientConfig::default()
        },
        ClientConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..ClientConfig::default()
        },
    ];

    for config in cases {
        assert!(
            matches!(config.validate(), Err(ConfigError::ValidationError { .. })),
            "Expected validation error for {config:?}"
        );
    }
}

/// **VALUE**: Verifies that base URLs with a path keep that path when endpoints are joined.
///
/// **BUG THIS CATCHES**: `Url::join("auth/login")` on `http://host/api` yields
/// `http://host/auth/login`, silently dropping the `/api` prefix.
#[test]
fn given_base_url_with_path_when_parsed_then_trailing_slash_added() {
    let config = ClientConfig {
        api_base_url: "http://localhost:8080/api".to_string(),
        ..ClientConfig::default()
    };

    let url = config.base_url().unwrap();

    assert_eq!(url.as_str(), "http://localhost:8080/api/");
    assert_eq!(
        url.join("auth/login").unwrap().as_str(),
        "http://localhost:8080/api/auth/login"
    );
}

#[test]
#[serial]
fn given_env_override_when_applied_then_env_wins_over_file() {
    // GIVEN: A file value and an env value
    let dir = TempDir::new().unwrap();
    write_config(&dir, "api_base_url = \"http://from-file.test\"\n");
    // SAFETY: serialized with other env tests via #[serial]
    unsafe { std::env::set_var(API_BASE_URL_ENV, "http://from-env.test") };

    // WHEN: Loading and applying overrides
    let config = ClientConfig::load(dir.path())
        .unwrap()
        .with_env_overrides();
    unsafe { std::env::remove_var(API_BASE_URL_ENV) };

    // THEN: Environment value is used
    assert_eq!(config.unwrap().api_base_url, "http://from-env.test");
}

#[test]
#[serial]
fn given_invalid_env_override_when_applied_then_validation_error() {
    unsafe { std::env::set_var(API_BASE_URL_ENV, "definitely not a url") };

    let result = ClientConfig::default().with_env_overrides();
    unsafe { std::env::remove_var(API_BASE_URL_ENV) };

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

#[test]
#[serial]
fn given_empty_env_override_when_applied_then_ignored() {
    unsafe { std::env::set_var(API_BASE_URL_ENV, "   ") };

    let result = ClientConfig::default().with_env_overrides();
    unsafe { std::env::remove_var(API_BASE_URL_ENV) };

    assert_eq!(result.unwrap().api_base_url, DEFAULT_API_BASE_URL);
}
