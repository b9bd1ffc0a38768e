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
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "INFLDB_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sources_path.to_string_lossy(), "./config/sources.yaml");
    assert_eq!(cfg.performance_dir, "./data/profiledata");
    assert_eq!(cfg.fetch_timeout_secs, 30);
    assert_eq!(cfg.fetch_user_agent, "infldb/0.1 (creator-directory)");
    assert_eq!(cfg.fetch_max_retries, 3);
    assert_eq!(cfg.fetch_backoff_base_ms, 500);
    assert_eq!(cfg.reload_cron, "0 */15 * * * *");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("INFLDB_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_BIND_ADDR"),
        "expected InvalidEnvVar(INFLDB_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("INFLDB_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_ENV"),
        "expected InvalidEnvVar(INFLDB_ENV), got: {result:?}"
    );
}

#[test]
fn fetch_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fetch_timeout_secs, 60);
}

#[test]
fn fetch_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_FETCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INFLDB_FETCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn fetch_timeout_secs_zero_rejected() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_FETCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(INFLDB_FETCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn fetch_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fetch_user_agent, "custom-agent/2.0");
}

#[test]
fn fetch_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_FETCH_MAX_RETRIES"),
        "expected InvalidEnvVar(INFLDB_FETCH_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn fetch_backoff_base_ms_override() {
    let mut map = HashMap::new();
    map.insert("INFLDB_FETCH_BACKOFF_BASE_MS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.fetch_backoff_base_ms, 0);
}

#[test]
fn sources_and_performance_paths_override() {
    let mut map = HashMap::new();
    map.insert("INFLDB_SOURCES_PATH", "/etc/infldb/sources.yaml");
    map.insert("INFLDB_PERFORMANCE_DIR", "https://cdn.example.com/profiledata");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.sources_path.to_string_lossy(), "/etc/infldb/sources.yaml");
    assert_eq!(cfg.performance_dir, "https://cdn.example.com/profiledata");
}

#[test]
fn reload_cron_requires_six_fields() {
    let mut map = HashMap::new();
    map.insert("INFLDB_RELOAD_CRON", "*/15 * * * *");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "INFLDB_RELOAD_CRON"),
        "expected InvalidEnvVar(INFLDB_RELOAD_CRON), got: {result:?}"
    );
}
