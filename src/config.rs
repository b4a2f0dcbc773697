//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::content::{ClientConfig, RouteTable};
use crate::view::{ImageOptions, StalePolicy, ViewOptions};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Content source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Overrides the repository's CDN endpoint
    pub endpoint: Option<String>,

    pub access_token: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Unset means requests may wait indefinitely
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub routes: RouteTable,
}

fn default_repository() -> String {
    "vanilla-leagues".to_string()
}

fn default_page_size() -> u32 {
    100
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            endpoint: None,
            access_token: None,
            page_size: default_page_size(),
            request_timeout_secs: None,
            routes: RouteTable::default(),
        }
    }
}

impl ContentConfig {
    /// Client configuration, with the preview ref if a preview session is active
    pub fn client_config(&self, preview_ref: Option<String>) -> ClientConfig {
        ClientConfig {
            repository: self.repository.clone(),
            endpoint: self.endpoint.clone(),
            access_token: self.access_token.clone(),
            routes: self.routes.clone(),
            page_size: self.page_size,
            request_timeout_ms: self.request_timeout_secs.map(|s| s.saturating_mul(1000)),
            preview_ref,
        }
    }
}

/// View rendering configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub stale_policy: StalePolicy,

    #[serde(default)]
    pub images: ImageOptions,
}

impl RenderConfig {
    pub fn view_options(&self, routes: &RouteTable) -> ViewOptions {
        ViewOptions {
            routes: routes.clone(),
            images: self.images.clone(),
            stale_policy: self.stale_policy,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("leagues").join("config.toml")),
            Some(PathBuf::from("./leagues.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(repository) = std::env::var("LEAGUES_REPOSITORY") {
            self.content.repository = repository;
        }
        if let Ok(endpoint) = std::env::var("LEAGUES_ENDPOINT") {
            self.content.endpoint = Some(endpoint);
        }
        if let Ok(token) = std::env::var("LEAGUES_ACCESS_TOKEN") {
            self.content.access_token = Some(token);
        }

        if let Ok(level) = std::env::var("LEAGUES_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LEAGUES_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Leagues Configuration
#
# Environment variables override these settings:
# - LEAGUES_REPOSITORY
# - LEAGUES_ENDPOINT
# - LEAGUES_ACCESS_TOKEN
# - LEAGUES_LOG_LEVEL
# - LEAGUES_LOG_FORMAT

[content]
# Content repository name
repository = "vanilla-leagues"

# API endpoint (default: https://<repository>.cdn.prismic.io/api/v2)
# endpoint = "https://vanilla-leagues.cdn.prismic.io/api/v2"

# Access token for private repositories
# access_token = ""

# Results per search page
page_size = 100

# Request timeout in seconds (unset: no timeout)
# request_timeout_secs = 30

# Document type -> URL path
[[content.routes]]
type = "league"
path = "/league/:uid"

[render]
# Older fetches finishing late: "last_write_wins" or "discard_stale"
stale_policy = "last_write_wins"

[render.images]
# Duotone filter for team logos, two hex colors
duotone = "ff0000,0000ff"
width = 300
height = 200
variants = [
    { width = 150, height = 100 },
    { width = 300, height = 200 },
]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.content.repository, "vanilla-leagues");
        assert_eq!(config.content.page_size, 100);
        assert_eq!(config.content.routes, RouteTable::default());
        assert_eq!(config.render.stale_policy, StalePolicy::LastWriteWins);
        assert_eq!(config.render.images, ImageOptions::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [content]
            repository = "other-leagues"
            request_timeout_secs = 5

            [render]
            stale_policy = "discard_stale"
            "#,
        )
        .unwrap();

        assert_eq!(config.content.repository, "other-leagues");
        assert_eq!(config.content.routes, RouteTable::default());
        assert_eq!(config.render.stale_policy, StalePolicy::DiscardStale);
        assert_eq!(config.logging.format, "pretty");

        let client = config.content.client_config(Some("DRAFT".into()));
        assert_eq!(client.request_timeout_ms, Some(5000));
        assert_eq!(client.preview_ref.as_deref(), Some("DRAFT"));
        assert_eq!(client.endpoint(), "https://other-leagues.cdn.prismic.io/api/v2");
    }

    #[test]
    fn test_huge_timeout_saturates() {
        let content = ContentConfig {
            request_timeout_secs: Some(u64::MAX),
            ..ContentConfig::default()
        };
        assert_eq!(content.client_config(None).request_timeout_ms, Some(u64::MAX));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"json\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.content.repository, "vanilla-leagues");
    }

    #[test]
    fn test_load_errors() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[content\nrepository = ").unwrap();
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_view_options() {
        let config = Config::default();
        let options = config.render.view_options(&config.content.routes);
        assert_eq!(options.stale_policy, StalePolicy::LastWriteWins);
        assert_eq!(options.routes, RouteTable::default());
    }
}
