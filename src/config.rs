//! Configuration Module
//!
//! Handles loading store settings from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::DEFAULT_LOCK_STRIPES;

/// Default location of the database file.
pub const DEFAULT_DB_PATH: &str = "./ttlkv.redb";

/// Store configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the database file
    pub db_path: PathBuf,
    /// Number of stripes guarding read-modify-write sequences
    pub lock_stripes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TTLKV_PATH` - Database file path (default: ./ttlkv.redb)
    /// - `TTLKV_LOCK_STRIPES` - Lock stripe count (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            db_path: lookup("TTLKV_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            lock_stripes: lookup("TTLKV_LOCK_STRIPES")
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.lock_stripes),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            lock_stripes: DEFAULT_LOCK_STRIPES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("./ttlkv.redb"));
        assert_eq!(config.lock_stripes, 64);
    }

    #[test]
    fn test_config_from_empty_env() {
        assert_eq!(Config::from_lookup(lookup_from(&[])), Config::default());
    }

    #[test]
    fn test_config_from_env_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("TTLKV_PATH", "/var/lib/ttlkv/data.redb"),
            ("TTLKV_LOCK_STRIPES", "128"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/var/lib/ttlkv/data.redb"));
        assert_eq!(config.lock_stripes, 128);
    }

    #[test]
    fn test_config_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("TTLKV_PATH", ""),
            ("TTLKV_LOCK_STRIPES", "zero"),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_lookup(lookup_from(&[("TTLKV_LOCK_STRIPES", "0")]));
        assert_eq!(config.lock_stripes, 64);
    }
}
