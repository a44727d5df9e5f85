//! Configuration tests

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

/// Verify that the generated template parses back to the same values.
#[test]
fn test_config_roundtrip_default() {
    let toml_str = Config::default().to_toml();

    let parsed = Config::parse_file_config(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let config = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(config.api_url, DEFAULT_URL_TEMPLATE);
    assert_eq!(config.request_timeout_secs, 10);
    assert_eq!(config.theme, Theme::Light);
    assert_eq!(config.stale_responses, StalePolicy::Overwrite);
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
}

#[test]
fn test_config_roundtrip_non_defaults() {
    let mut config = Config::default();
    config.api_url = "http://localhost:3000/users/{id}".to_string();
    config.theme = Theme::Dark;
    config.stale_responses = StalePolicy::Discard;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file = Config::parse_file_config(&config.to_toml()).unwrap();
    let parsed = Config::resolve(file, no_env);

    assert_eq!(parsed.api_url, "http://localhost:3000/users/{id}");
    assert_eq!(parsed.theme, Theme::Dark);
    assert_eq!(parsed.stale_responses, StalePolicy::Discard);
    assert!(parsed.logging.file_enabled);
    assert_eq!(parsed.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = Config::parse_file_config("").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.api_url, DEFAULT_URL_TEMPLATE);
    assert!(config.enable_tui);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file = Config::parse_file_config(
        r#"
api_url = "http://file/users/{id}"
theme = "light"
request_timeout_secs = 3
"#,
    )
    .unwrap();

    let env: HashMap<&str, &str> = [
        ("USER_CARD_API_URL", "http://env/users/{id}"),
        ("USER_CARD_THEME", "DARK"),
        ("USER_CARD_TIMEOUT_SECS", "not-a-number"),
        ("USER_CARD_NO_TUI", "1"),
    ]
    .into_iter()
    .collect();

    let config = Config::resolve(file, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.api_url, "http://env/users/{id}");
    assert_eq!(config.theme, Theme::Dark);
    // Unparseable env value falls back to the file
    assert_eq!(config.request_timeout_secs, 3);
    assert!(!config.enable_tui);
}

#[test]
fn test_invalid_file_is_an_error() {
    assert!(Config::parse_file_config("theme = dark").is_err());
    assert!(Config::parse_file_config("request_timeout_secs = \"ten\"").is_err());
}

#[test]
fn test_unknown_stale_policy_falls_back_to_overwrite() {
    let file = Config::parse_file_config("stale_responses = \"sometimes\"").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.stale_responses, StalePolicy::Overwrite);
}

#[test]
fn test_partial_logging_section_keeps_defaults() {
    let file = Config::parse_file_config(
        r#"
[logging]
file_enabled = true
file_rotation = "never"
"#,
    )
    .unwrap();
    let config = Config::resolve(file, no_env);

    assert!(config.logging.file_enabled);
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_prefix, "user-card");
}

#[test]
fn test_unknown_rotation_is_an_error() {
    let parsed = Config::parse_file_config("[logging]\nfile_rotation = \"weekly\"");
    assert!(parsed.is_err());
}

#[test]
fn test_zero_timeout_is_raised_to_one_second() {
    let file = Config::parse_file_config("request_timeout_secs = 0").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.request_timeout_secs, 1);

    let file = Config::parse_file_config("").unwrap();
    let config = Config::resolve(file, |key| {
        (key == "USER_CARD_TIMEOUT_SECS").then(|| "0".to_string())
    });
    assert_eq!(config.request_timeout(), Duration::from_secs(1));
}
