//! Configuration management for the glot application.
//!
//! Centralizes all configuration options and provides a clean interface
//! for accessing application settings.

use std::net::{IpAddr, Ipv4Addr};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// GitHub API configuration
    pub github: GitHubConfig,
    /// Card response configuration
    pub card: CardConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Default host address
    pub default_host: IpAddr,
    /// Default port
    pub default_port: u16,
}

/// GitHub API configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// GitHub API token (optional)
    pub token: Option<String>,
    /// API retry attempts
    pub retry_attempts: u8,
}

/// Card response configuration
#[derive(Debug, Clone)]
pub struct CardConfig {
    /// `max-age`/`s-maxage` for successful card responses, in seconds
    pub cache_seconds: u32,
    /// Usernames that are never served a card
    pub blacklist: Vec<String>,
}

/// `stale-while-revalidate` window for successful card responses.
pub const STALE_WHILE_REVALIDATE_SECONDS: u32 = 86_400;

/// Default `max-age`/`s-maxage` (four hours).
pub const DEFAULT_CACHE_SECONDS: u32 = 14_400;

/// CLI configuration overrides
#[derive(Debug, Clone)]
pub struct CliOverrides {
    /// GitHub token override
    pub token: Option<String>,
    /// Port override
    pub port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            github: GitHubConfig::default(),
            card: CardConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            default_host: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            default_port: 8080,
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            retry_attempts: 3,
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            cache_seconds: DEFAULT_CACHE_SECONDS,
            blacklist: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with CLI overrides
    pub fn load(cli_overrides: Option<CliOverrides>) -> Self {
        let mut config = Self::default();

        // Apply CLI overrides if provided
        if let Some(overrides) = cli_overrides {
            if let Some(token) = overrides.token {
                config.github.token = Some(token);
            }
            if let Some(port) = overrides.port {
                config.server.default_port = port;
            }
        }

        // Load from environment variables (CLI overrides take precedence)
        if config.github.token.is_none() {
            config.github.token = std::env::var("GITHUB_TOKEN").ok();
        }

        if config.server.default_port == 8080 {
            if let Ok(port_str) = std::env::var("PORT") {
                if let Ok(port) = port_str.parse::<u16>() {
                    config.server.default_port = port;
                }
            }
        }

        if let Ok(seconds_str) = std::env::var("CACHE_SECONDS") {
            if let Ok(seconds) = seconds_str.parse::<u32>() {
                config.card.cache_seconds = seconds;
            }
        }

        if let Ok(blacklist) = std::env::var("BLACKLIST") {
            config.card.blacklist = blacklist
                .split(',')
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect();
        }

        config
    }

    /// Get the default host address
    pub fn default_host(&self) -> IpAddr {
        self.server.default_host
    }

    /// Get the default port
    pub fn default_port(&self) -> u16 {
        self.server.default_port
    }

    /// Get the GitHub token
    pub fn github_token(&self) -> Option<&str> {
        self.github.token.as_deref()
    }

    /// Get the card response configuration
    pub fn card_config(&self) -> &CardConfig {
        &self.card
    }
}

impl CliOverrides {
    /// Create CLI overrides from CLI arguments
    pub fn from_cli_args(token: Option<String>, port: Option<u16>) -> Self {
        Self { token, port }
    }
}
