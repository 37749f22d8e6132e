use std::{env, path::Path, time::Duration};

const DEFAULT_DATABASE_URL: &str = "sqlite://bookstore.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Store configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite connection URL (default: "sqlite://bookstore.db")
    pub database_url: String,
    /// Upper bound on pooled connections (default: 20)
    pub max_connections: u32,
    /// Seconds to wait for a free connection before failing (default: 5)
    pub acquire_timeout_secs: u64,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - SQLite connection URL (default: "sqlite://bookstore.db")
    /// - `DB_MAX_CONNECTIONS` - Pool size (default: 20)
    /// - `DB_ACQUIRE_TIMEOUT_SECS` - Acquire timeout in seconds (default: 5)
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout_secs: lookup("DB_ACQUIRE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    /// Configuration for a database file at `path`, other settings at default.
    pub fn sqlite_file(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite://{}", path.as_ref().display()),
            ..Self::default()
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout_secs(mut self, secs: u64) -> Self {
        self.acquire_timeout_secs = secs;
        self
    }

    /// Get the acquire timeout as a Duration.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = StoreConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.database_url, "sqlite://bookstore.db");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.acquire_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_values_from_environment() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite://shop.db"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "30"),
        ]));

        assert_eq!(config.database_url, "sqlite://shop.db");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.acquire_timeout_secs, 30);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "  "),
            ("DB_MAX_CONNECTIONS", "0"),
            ("DB_ACQUIRE_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_sqlite_file_builds_url() {
        let config = StoreConfig::sqlite_file("/tmp/books.db").with_max_connections(2);

        assert_eq!(config.database_url, "sqlite:///tmp/books.db");
        assert_eq!(config.max_connections, 2);
    }
}
