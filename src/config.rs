//! Environment-driven application configuration.
//!
//! All configuration is read once at startup. Missing required variables and
//! unparseable values fail fast with a tagged [`ConfigError`] so the process
//! never serves traffic with a half-formed configuration.

use chrono::Duration as ChronoDuration;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The environment variable name.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// CORS and rate-limit settings for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Allowed CORS origins; a single `*` entry allows any origin.
    pub cors_origins: Vec<String>,
    /// Fixed-window rate limit applied per client address.
    pub rate_limit: RateLimitSettings,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors_origins: vec!["*".to_owned()],
            rate_limit: RateLimitSettings::default(),
        }
    }
}

/// Fixed-window rate limit parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Window length.
    pub window: Duration,
    /// Maximum requests admitted per window.
    pub max: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window: Duration::from_millis(60_000),
            max: 100,
        }
    }
}

/// Upstream GitHub API settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubSettings {
    /// Base URL of the GitHub REST API.
    pub api_url: String,
    /// Optional token for authenticated (higher rate limit) calls.
    pub token: Option<String>,
    /// Per-request timeout for upstream calls.
    pub timeout: Duration,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_owned(),
            token: None,
            timeout: Duration::from_millis(10_000),
        }
    }
}

/// TTL cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    /// Default entry time-to-live.
    pub ttl: ChronoDuration,
    /// Whether the cache stores anything at all.
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: ChronoDuration::minutes(10),
            enabled: true,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP listening port.
    pub port: u16,
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// HTTP middleware settings.
    pub http: HttpSettings,
    /// Upstream GitHub settings.
    pub github: GitHubSettings,
    /// TTL cache settings.
    pub cache: CacheSettings,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `PORT` | `3000` |
    /// | `DATABASE_URL` | required |
    /// | `CORS_ORIGIN` | `*` (comma-separated list) |
    /// | `RATE_LIMIT_WINDOW_MS` | `60000` |
    /// | `RATE_LIMIT_MAX` | `100` |
    /// | `GITHUB_API_URL` | `https://api.github.com` |
    /// | `GITHUB_TOKEN` | unset |
    /// | `GITHUB_TIMEOUT_MS` | `10000` |
    /// | `CACHE_TTL_MS` | `600000` |
    /// | `CACHE_DISABLED` | `false` |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_or_default("PORT", 3000_u16)?;
        let database_url = require_env("DATABASE_URL")?;

        let cors_origins = optional_env("CORS_ORIGIN")
            .map_or_else(|| vec!["*".to_owned()], |raw| parse_origins(&raw));
        let rate_limit = RateLimitSettings {
            window: Duration::from_millis(parse_or_default("RATE_LIMIT_WINDOW_MS", 60_000_u64)?),
            max: parse_or_default("RATE_LIMIT_MAX", 100_u32)?,
        };

        let github = GitHubSettings {
            api_url: optional_env("GITHUB_API_URL")
                .unwrap_or_else(|| "https://api.github.com".to_owned()),
            token: optional_env("GITHUB_TOKEN"),
            timeout: Duration::from_millis(parse_or_default("GITHUB_TIMEOUT_MS", 10_000_u64)?),
        };

        let cache = CacheSettings {
            ttl: ChronoDuration::milliseconds(parse_or_default("CACHE_TTL_MS", 600_000_i64)?),
            enabled: !parse_bool(&optional_env("CACHE_DISABLED").unwrap_or_default()),
        };

        Ok(Self {
            port,
            database_url,
            http: HttpSettings {
                cors_origins,
                rate_limit,
            },
            github,
            cache,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_owned()))
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|err| ConfigError::InvalidValue {
            key: key.to_owned(),
            message: format!("{err}"),
        }),
    }
}

/// Splits a comma-separated origin list, trimming surrounding whitespace.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Interprets common truthy spellings; anything else is `false`.
fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1")
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_origins};

    #[test]
    fn parse_origins_splits_and_trims() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example".to_owned(), "https://b.example".to_owned()],
        );
    }

    #[test]
    fn parse_origins_keeps_wildcard() {
        assert_eq!(parse_origins("*"), vec!["*".to_owned()]);
    }

    #[test]
    fn parse_bool_accepts_true_and_one() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool(" TRUE "));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
        assert!(!parse_bool("yes"));
    }
}
