//! Configuration schema definitions.
//!
//! All types derive Serde traits so a config can be dumped or loaded as
//! JSON in tooling, but the canonical source is the process environment
//! (see `env.rs`).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Deployment environment (`development`, `test`, `production`).
    pub environment: String,

    /// TCP port the HTTP surface binds to.
    pub port: u16,

    /// Service name, attached to log entries.
    pub app_name: String,

    /// Database connection settings (consumed by future API routes).
    pub database: DatabaseConfig,

    /// API key for outbound integrations.
    pub api_key: String,

    /// Secret used to sign JWTs.
    pub jwt_secret: String,

    /// Minimum log severity (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,

    /// HTTP surface policy settings.
    pub http: HttpConfig,

    /// Rate limiting for the `/api` mount point.
    pub rate_limit: RateLimitConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            app_name: "my-app".to_string(),
            database: DatabaseConfig::default(),
            api_key: String::new(),
            jwt_secret: String::new(),
            log_level: "info".to_string(),
            http: HttpConfig::default(),
            rate_limit: RateLimitConfig::default(),
            shutdown: ShutdownConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_test(&self) -> bool {
        self.environment == "test"
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            name: String::new(),
            user: String::new(),
            password: String::new(),
        }
    }
}

/// HTTP surface policy settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Maximum accepted request body size in bytes.
    pub body_limit_bytes: usize,

    /// Origins allowed by CORS in production. Non-production environments
    /// mirror the request origin instead.
    pub allowed_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            body_limit_bytes: 10 * 1024 * 1024,
            allowed_origins: vec!["https://yourdomain.com".to_string()],
        }
    }
}

/// Rate limiting configuration for routes under `/api`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per client per window.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Maximum time allowed for in-flight requests to drain.
    pub grace_period_secs: u64,
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 30,
        }
    }
}
