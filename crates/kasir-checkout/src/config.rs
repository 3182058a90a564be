//! Checkout configuration.
//!
//! Loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default                          |
//! |---------------------------|----------------------------------|
//! | `KASIR_DB_PATH`           | platform data dir, `./kasir.db`  |
//! | `KASIR_STOCK_CONCURRENCY` | 4 (at least 1)                   |
//! | `KASIR_HISTORY_LIMIT`     | 20                               |
//! | `KASIR_FALLBACK_CASHIER`  | `Admin`                          |

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use kasir_core::FALLBACK_CASHIER_NAME;

use crate::error::ConfigError;

pub const DEFAULT_STOCK_CONCURRENCY: usize = 4;
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Stock updates a single checkout runs at once.
    pub stock_concurrency: usize,

    /// Size of the recent-transactions list when none is asked for.
    pub history_limit: u32,

    /// Shown when a cashier id has no user row.
    pub fallback_cashier_name: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            database_path: default_database_path(),
            stock_concurrency: DEFAULT_STOCK_CONCURRENCY,
            history_limit: DEFAULT_HISTORY_LIMIT,
            fallback_cashier_name: FALLBACK_CASHIER_NAME.to_string(),
        }
    }
}

impl CheckoutConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables read from `lookup`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = CheckoutConfig::default();

        let stock_concurrency = match lookup("KASIR_STOCK_CONCURRENCY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => return Err(ConfigError::InvalidValue("KASIR_STOCK_CONCURRENCY".to_string())),
            },
            None => defaults.stock_concurrency,
        };

        let history_limit = match lookup("KASIR_HISTORY_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("KASIR_HISTORY_LIMIT".to_string()))?,
            None => defaults.history_limit,
        };

        let fallback_cashier_name = match lookup("KASIR_FALLBACK_CASHIER") {
            Some(raw) if raw.trim().is_empty() => {
                return Err(ConfigError::InvalidValue("KASIR_FALLBACK_CASHIER".to_string()))
            }
            Some(raw) => raw.trim().to_string(),
            None => defaults.fallback_cashier_name,
        };

        Ok(CheckoutConfig {
            database_path: lookup("KASIR_DB_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            stock_concurrency,
            history_limit,
            fallback_cashier_name,
        })
    }

    /// Sets the database path.
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Sets the stock update parallelism (at least 1).
    pub fn stock_concurrency(mut self, n: usize) -> Self {
        self.stock_concurrency = n.max(1);
        self
    }
}

/// `kasir.db` in the platform data directory, or the working directory when
/// there is none.
///
/// - **macOS**: `~/Library/Application Support/id.kasir.kasir/kasir.db`
/// - **Windows**: `%APPDATA%\kasir\kasir\data\kasir.db`
/// - **Linux**: `~/.local/share/kasir/kasir.db`
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("id", "kasir", "kasir")
        .map(|dirs| dirs.data_dir().join("kasir.db"))
        .unwrap_or_else(|| PathBuf::from("./kasir.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.stock_concurrency, 4);
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.fallback_cashier_name, "Admin");
        assert!(config.database_path.ends_with("kasir.db"));
    }

    #[test]
    fn test_overrides() {
        let config = CheckoutConfig::from_vars(vars(&[
            ("KASIR_DB_PATH", "/tmp/toko.db"),
            ("KASIR_STOCK_CONCURRENCY", "8"),
            ("KASIR_HISTORY_LIMIT", "50"),
            ("KASIR_FALLBACK_CASHIER", "Kasir"),
        ]))
        .unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/toko.db"));
        assert_eq!(config.stock_concurrency, 8);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.fallback_cashier_name, "Kasir");
    }

    #[test]
    fn test_invalid_values() {
        for (var, value) in [
            ("KASIR_STOCK_CONCURRENCY", "0"),
            ("KASIR_STOCK_CONCURRENCY", "many"),
            ("KASIR_HISTORY_LIMIT", "-1"),
            ("KASIR_FALLBACK_CASHIER", "  "),
        ] {
            let err = CheckoutConfig::from_vars(vars(&[(var, value)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(v) if v == var));
        }
    }
}
