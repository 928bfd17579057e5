//! # Ledger Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHUBAGO_DB_PATH=/var/lib/shubago/ledger.db                         │
//! │     SHUBAGO_TAX_RATE=5          (percent)                              │
//! │     SHUBAGO_LINE_POLICY=strict                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shubago/shubago.toml (Linux)                             │
//! │     ~/Library/Application Support/com.shubago.pharmacy/shubago.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     12% tax, best-effort lines, 8 recent invoices                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! database_path = "/var/lib/shubago/ledger.db"
//! store_key = "shubago_pharma_v1"
//! tax_rate_bps = 1200
//! line_resolution = "best_effort"  # best_effort | strict
//! recent_limit = 8
//! ```

use serde::{Deserialize, Serialize};
use shubago_core::{LedgerPolicy, LineResolution, TaxRate, DEFAULT_RECENT_LIMIT, DEFAULT_TAX_RATE_BPS};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

/// Key the ledger document is stored under unless configured otherwise.
pub const DEFAULT_STORE_KEY: &str = "shubago_pharma_v1";

/// Highest accepted tax rate: 100%.
const MAX_TAX_RATE_BPS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// SQLite file holding the `kv_store` table.
    pub database_path: PathBuf,

    /// Key of the ledger document inside `kv_store`.
    pub store_key: String,

    /// Flat sales tax in basis points (1200 = 12%).
    pub tax_rate_bps: u32,

    /// What to do with lines naming unknown products.
    pub line_resolution: LineResolution,

    /// Invoices listed on the dashboard.
    pub recent_limit: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            database_path: default_database_path(),
            store_key: DEFAULT_STORE_KEY.to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            line_resolution: LineResolution::default(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`shubago.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> DbResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading ledger config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> DbResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DbError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DbError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| DbError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Ledger config saved");
        Ok(())
    }

    pub fn validate(&self) -> DbResult<()> {
        if self.store_key.trim().is_empty() {
            return Err(DbError::InvalidConfig("store_key must not be empty".into()));
        }

        if self.tax_rate_bps > MAX_TAX_RATE_BPS {
            return Err(DbError::InvalidConfig(format!(
                "tax_rate_bps must be at most {}, got {}",
                MAX_TAX_RATE_BPS, self.tax_rate_bps
            )));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(DbError::InvalidConfig("database_path must not be empty".into()));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("SHUBAGO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = PathBuf::from(path);
        }

        if let Ok(key) = std::env::var("SHUBAGO_STORE_KEY") {
            self.store_key = key;
        }

        // Percent, e.g. "12" or "7.5"
        if let Ok(rate) = std::env::var("SHUBAGO_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    debug!(percent = pct, "Overriding tax rate from environment");
                    self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparseable SHUBAGO_TAX_RATE"),
            }
        }

        if let Ok(policy) = std::env::var("SHUBAGO_LINE_POLICY") {
            match policy.parse() {
                Ok(parsed) => self.line_resolution = parsed,
                Err(_) => warn!(policy = %policy, "Unknown line policy in environment"),
            }
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shubago", "pharmacy")
            .map(|dirs| dirs.config_dir().join("shubago.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The tunables the Store operations read.
    pub fn policy(&self) -> LedgerPolicy {
        LedgerPolicy {
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
            line_resolution: self.line_resolution,
            recent_limit: self.recent_limit,
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
    }
}

fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "shubago", "pharmacy")
        .map(|dirs| dirs.data_dir().join("shubago.db"))
        .unwrap_or_else(|| PathBuf::from("shubago.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.store_key, "shubago_pharma_v1");
        assert!(config.validate().is_ok());

        let policy = config.policy();
        assert_eq!(policy, LedgerPolicy::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LedgerConfig = toml::from_str(
            r#"
            tax_rate_bps = 500
            line_resolution = "strict"
            "#,
        )
        .unwrap();

        assert_eq!(config.tax_rate_bps, 500);
        assert_eq!(config.line_resolution, LineResolution::Strict);
        assert_eq!(config.recent_limit, 8);
        assert_eq!(config.store_key, DEFAULT_STORE_KEY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = LedgerConfig {
            tax_rate_bps: 10_001,
            ..LedgerConfig::default()
        };
        assert!(matches!(config.validate(), Err(DbError::InvalidConfig(_))));

        let config = LedgerConfig {
            store_key: "  ".into(),
            ..LedgerConfig::default()
        };
        assert!(matches!(config.validate(), Err(DbError::InvalidConfig(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("shubago-config-{}", std::process::id()));
        let path = dir.join("shubago.toml");

        let config = LedgerConfig {
            database_path: dir.join("ledger.db"),
            tax_rate_bps: 750,
            ..LedgerConfig::default()
        };
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: LedgerConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(dir).ok();
    }
}
