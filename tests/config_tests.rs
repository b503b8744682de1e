use std::net::{IpAddr, Ipv4Addr};

use glot::config::{CliOverrides, Config, DEFAULT_CACHE_SECONDS, STALE_WHILE_REVALIDATE_SECONDS};

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(
        config.server.default_host,
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.server.default_port, 8080);

    assert_eq!(config.github.token, None);
    assert_eq!(config.github.retry_attempts, 3);

    assert_eq!(config.card.cache_seconds, DEFAULT_CACHE_SECONDS);
    assert_eq!(config.card.cache_seconds, 14_400);
    assert!(config.card.blacklist.is_empty());
}

#[test]
fn test_cache_constants() {
    assert_eq!(STALE_WHILE_REVALIDATE_SECONDS, 86_400);
}

#[test]
fn test_config_getter_methods() {
    let mut config = Config::default();
    config.github.token = Some("test-token".to_string());
    config.server.default_port = 9000;

    assert_eq!(
        config.default_host(),
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.default_port(), 9000);
    assert_eq!(config.github_token(), Some("test-token"));
    assert_eq!(config.card_config().cache_seconds, DEFAULT_CACHE_SECONDS);
}

#[test]
fn test_cli_overrides_from_cli_args() {
    let overrides = CliOverrides::from_cli_args(Some("test-token".to_string()), Some(9000));

    assert_eq!(overrides.token, Some("test-token".to_string()));
    assert_eq!(overrides.port, Some(9000));

    let empty = CliOverrides::from_cli_args(None, None);
    assert_eq!(empty.token, None);
    assert_eq!(empty.port, None);
}

// Environment-dependent loading is exercised in a single test to keep env
// mutation serialized within this binary.
#[test]
fn test_config_load_precedence() {
    std::env::remove_var("GITHUB_TOKEN");
    std::env::remove_var("PORT");
    std::env::remove_var("CACHE_SECONDS");
    std::env::remove_var("BLACKLIST");

    // Defaults when nothing is set
    let config = Config::load(None);
    assert_eq!(config.github.token, None);
    assert_eq!(config.server.default_port, 8080);
    assert_eq!(config.card.cache_seconds, DEFAULT_CACHE_SECONDS);
    assert!(config.card.blacklist.is_empty());

    // Environment variables apply
    std::env::set_var("GITHUB_TOKEN", "env-token");
    std::env::set_var("PORT", "5000");
    std::env::set_var("CACHE_SECONDS", "7200");
    std::env::set_var("BLACKLIST", "first, second ,,third");

    let config = Config::load(None);
    assert_eq!(config.github.token, Some("env-token".to_string()));
    assert_eq!(config.server.default_port, 5000);
    assert_eq!(config.card.cache_seconds, 7200);
    assert_eq!(config.card.blacklist, vec!["first", "second", "third"]);

    // CLI overrides take precedence over the environment
    let overrides = CliOverrides::from_cli_args(Some("cli-token".to_string()), Some(9000));
    let config = Config::load(Some(overrides));
    assert_eq!(config.github.token, Some("cli-token".to_string()));
    assert_eq!(config.server.default_port, 9000);

    // Invalid numeric values fall back to defaults
    std::env::set_var("PORT", "not-a-port");
    std::env::set_var("CACHE_SECONDS", "sometimes");
    let config = Config::load(None);
    assert_eq!(config.server.default_port, 8080);
    assert_eq!(config.card.cache_seconds, DEFAULT_CACHE_SECONDS);

    std::env::remove_var("GITHUB_TOKEN");
    std::env::remove_var("PORT");
    std::env::remove_var("CACHE_SECONDS");
    std::env::remove_var("BLACKLIST");
}
