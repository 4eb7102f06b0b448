//! Configuration loading from the process environment.

use crate::config::schema::AppConfig;

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    Missing(&'static str),
    /// An environment variable is present but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(key) => {
                write!(f, "environment variable {} is not set", key)
            }
            ConfigError::Invalid { key, value } => {
                write!(f, "environment variable {} has invalid value {:?}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration from the process environment.
pub fn load() -> Result<AppConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build a configuration from an arbitrary key lookup.
///
/// Empty values are treated the same as absent ones.
pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    let optional = |key: &'static str, default: &str| get(key).unwrap_or_else(|| default.to_string());
    let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

    let mut config = AppConfig::default();

    config.environment = optional("NODE_ENV", "development");
    config.port = parse_port("PORT", optional("PORT", "3000"))?;
    config.app_name = optional("APP_NAME", "my-app");

    config.database.host = optional("DB_HOST", "localhost");
    config.database.port = parse_port("DB_PORT", optional("DB_PORT", "5432"))?;
    config.database.name = required("DB_NAME")?;
    config.database.user = required("DB_USER")?;
    config.database.password = required("DB_PASSWORD")?;

    config.api_key = required("API_KEY")?;
    config.jwt_secret = required("JWT_SECRET")?;
    config.log_level = optional("LOG_LEVEL", "info");

    Ok(config)
}

fn parse_port(key: &'static str, value: String) -> Result<u16, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    const REQUIRED_ONLY: &[(&'static str, &'static str)] = &[
        ("DB_NAME", "appdb"),
        ("DB_USER", "app"),
        ("DB_PASSWORD", "secret"),
        ("API_KEY", "key"),
        ("JWT_SECRET", "jwt"),
    ];

    #[test]
    fn test_defaults_applied_for_optional_keys() {
        let config = from_lookup(lookup_from(REQUIRED_ONLY)).unwrap();

        assert_eq!(config.environment, "development");
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_name, "my-app");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database.name, "appdb");
    }

    #[test]
    fn test_missing_required_key_fails() {
        let without_db_name: Vec<(&str, &str)> = REQUIRED_ONLY
            .iter()
            .copied()
            .filter(|(k, _)| *k != "DB_NAME")
            .collect();

        let result = from_lookup(|key| {
            without_db_name
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        });

        match result {
            Err(ConfigError::Missing(key)) => assert_eq!(key, "DB_NAME"),
            other => panic!("expected missing DB_NAME, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_required_value_treated_as_missing() {
        let result = from_lookup(|key| {
            if key == "DB_NAME" {
                Some(String::new())
            } else {
                lookup_from(REQUIRED_ONLY)(key)
            }
        });

        assert!(matches!(result, Err(ConfigError::Missing("DB_NAME"))));
    }

    #[test]
    fn test_invalid_port_fails() {
        let result = from_lookup(|key| {
            if key == "PORT" {
                Some("not-a-port".to_string())
            } else {
                lookup_from(REQUIRED_ONLY)(key)
            }
        });

        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let result = from_lookup(|key| match key {
            "NODE_ENV" => Some("production".to_string()),
            "PORT" => Some("8080".to_string()),
            other => lookup_from(REQUIRED_ONLY)(other),
        })
        .unwrap();

        assert!(result.is_production());
        assert_eq!(result.port, 8080);
    }
}
