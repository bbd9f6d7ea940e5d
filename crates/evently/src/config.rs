use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string (default: "sqlite://evently.db?mode=rwc")
    pub database_url: String,
    /// Maximum pooled connections (default: 5)
    pub db_pool_max: u32,
    /// Minimum pooled connections (default: 1)
    pub db_pool_min: u32,
    /// How long a request waits for a connection, in milliseconds (default: 30,000)
    pub db_acquire_timeout_ms: u64,
    /// How long an unused connection stays open, in milliseconds (default: 1,000)
    pub db_idle_timeout_ms: u64,
    /// Origin allowed by CORS; `*` allows any (default: "http://localhost:4200")
    pub cors_origin: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection string (default: "sqlite://evently.db?mode=rwc")
    /// - `DB_POOL_MAX` - Maximum pooled connections (default: 5)
    /// - `DB_POOL_MIN` - Minimum pooled connections (default: 1)
    /// - `DB_ACQUIRE_TIMEOUT_MS` - Connection acquire timeout (default: 30,000)
    /// - `DB_IDLE_TIMEOUT_MS` - Idle connection timeout (default: 1,000)
    /// - `CORS_ORIGIN` - Allowed CORS origin (default: "http://localhost:4200")
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
    ///
    /// Unparsable values fall back to the default. `DB_POOL_MIN` is capped at
    /// `DB_POOL_MAX`.
    pub fn from_env() -> Self {
        let db_pool_max = parse_env("DB_POOL_MAX", 5).max(1);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://evently.db?mode=rwc".to_string()),
            db_pool_max,
            db_pool_min: parse_env("DB_POOL_MIN", 1).min(db_pool_max),
            db_acquire_timeout_ms: parse_env("DB_ACQUIRE_TIMEOUT_MS", 30_000),
            db_idle_timeout_ms: parse_env("DB_IDLE_TIMEOUT_MS", 1_000),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
            request_timeout_seconds: parse_env("REQUEST_TIMEOUT_SECONDS", 10),
        }
    }

    /// Get the connection acquire timeout as a Duration.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.db_acquire_timeout_ms)
    }

    /// Get the idle connection timeout as a Duration.
    #[cfg_attr(not(feature = "sqlite"), allow(dead_code))]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.db_idle_timeout_ms)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
