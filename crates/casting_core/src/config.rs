//! Process configuration loaded from the environment.
//!
//! | Env var              | Default        |
//! |----------------------|----------------|
//! | `DATABASE_URL`       | required       |
//! | `DB_BUSY_TIMEOUT_MS` | `5000`         |
//! | `LOG_LEVEL`          | build default  |
//! | `LOG_DIR`            | unset (no file logging) |

use crate::db::{DatabaseTarget, DbError};
use crate::logging::default_log_level;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("required environment variable `{0}` is not set")]
    Missing(&'static str),

    #[error("environment variable `{name}` has invalid value `{value}`")]
    Invalid { name: &'static str, value: String },

    #[error("environment variable `DATABASE_URL` is unusable: {source}")]
    DatabaseUrl {
        #[source]
        source: DbError,
    },
}

/// Core runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Connection string handed to [`crate::db::setup`].
    pub database_url: String,
    /// SQLite busy timeout applied to every opened connection.
    pub busy_timeout: Duration,
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` keeps logging off.
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Loads `.env` when present, then reads process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        DatabaseTarget::parse(&database_url)
            .map_err(|source| ConfigError::DatabaseUrl { source })?;

        let busy_timeout_ms = match lookup("DB_BUSY_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid {
                    name: "DB_BUSY_TIMEOUT_MS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        let log_level = lookup("LOG_LEVEL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = lookup("LOG_DIR")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            database_url,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig};
    use crate::db::DbError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> = pairs
            .iter()
            .map(|(key, value)| (*key, (*value).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn database_url_is_required() {
        let err = CoreConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));

        let err = CoreConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_unset() {
        let config =
            CoreConfig::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite::memory:")])).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.busy_timeout, Duration::from_millis(5_000));
        assert_eq!(config.log_level, crate::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn reads_overrides() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://casting.db"),
            ("DB_BUSY_TIMEOUT_MS", " 250 "),
            ("LOG_LEVEL", "warn"),
            ("LOG_DIR", "/tmp/casting-logs"),
        ]))
        .unwrap();
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/casting-logs")));
    }

    #[test]
    fn rejects_malformed_busy_timeout() {
        let err = CoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("DB_BUSY_TIMEOUT_MS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DB_BUSY_TIMEOUT_MS",
                ref value,
            } if value == "soon"
        ));
    }

    #[test]
    fn rejects_unsupported_database_url() {
        let err = CoreConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/casting",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DatabaseUrl {
                source: DbError::InvalidUrl { .. }
            }
        ));
        assert!(err.to_string().contains("only sqlite"));
    }
}
