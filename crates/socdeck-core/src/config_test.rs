use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SOCDECK_ENV"));
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.customers_path.to_string_lossy(),
        "./config/customers.yaml"
    );
    assert_eq!(cfg.dataset_path.to_string_lossy(), "./data/metrics.json");
    assert_eq!(cfg.output_dir.to_string_lossy(), "./out");
    assert_eq!(cfg.query_timeout_secs, 20);
    assert_eq!(cfg.asset_timeout_secs, 10);
    assert_eq!(cfg.asset_user_agent, "socdeck/0.1 (report-assets)");
    assert_eq!(cfg.asset_max_bytes, 8_388_608);
    assert_eq!(cfg.top_posts, 6);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("SOCDECK_ENV", "production");
    map.insert("SOCDECK_LOG_LEVEL", "debug");
    map.insert("SOCDECK_QUERY_TIMEOUT_SECS", "5");
    map.insert("SOCDECK_ASSET_TIMEOUT_SECS", "3");
    map.insert("SOCDECK_ASSET_USER_AGENT", "custom-agent/2.0");
    map.insert("SOCDECK_TOP_POSTS", "9");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.query_timeout(), std::time::Duration::from_secs(5));
    assert_eq!(cfg.asset_timeout(), std::time::Duration::from_secs(3));
    assert_eq!(cfg.asset_user_agent, "custom-agent/2.0");
    assert_eq!(cfg.top_posts, 9);
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("SOCDECK_QUERY_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCDECK_QUERY_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SOCDECK_QUERY_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_asset_timeout() {
    let mut map = HashMap::new();
    map.insert("SOCDECK_ASSET_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCDECK_ASSET_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SOCDECK_ASSET_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_top_posts_out_of_range() {
    for raw in ["0", "13"] {
        let mut map = HashMap::new();
        map.insert("SOCDECK_TOP_POSTS", raw);
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCDECK_TOP_POSTS"),
            "expected InvalidEnvVar(SOCDECK_TOP_POSTS) for {raw}, got: {result:?}"
        );
    }
}

#[test]
fn build_app_config_rejects_invalid_max_bytes() {
    let mut map = HashMap::new();
    map.insert("SOCDECK_ASSET_MAX_BYTES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SOCDECK_ASSET_MAX_BYTES"),
        "expected InvalidEnvVar(SOCDECK_ASSET_MAX_BYTES), got: {result:?}"
    );
}
