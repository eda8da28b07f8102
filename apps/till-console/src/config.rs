//! # Till Configuration
//!
//! Store identity, data file locations and discount rules.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --data ./data                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_DATA_DIR, TILL_STORE_NAME,                                    │
//! │     TILL_CURRENCY_SYMBOL, TILL_LOYALTY_MODE                            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/pos/till.toml (Linux)                                    │
//! │     ~/Library/Application Support/com.till.pos/till.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # till.toml
//! [store]
//! name = "Till Fast Food"
//! currency_symbol = "Rs."
//!
//! [data]
//! dir = "./data"
//! products_file = "products.json"
//! inventory_file = "inventory.json"
//! orders_file = "orders.json"
//!
//! [discounts]
//! card_bps = 500
//! returning_customer_bps = 270
//! loyalty_after_orders = 10
//! loyalty_bps = 1200
//! loyalty_mode = "stacked"   # stacked | top_up
//!
//! [discounts.item_overrides]
//! "Zinger Burger" = 1500
//! ```

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use till_core::validation::validate_discount_bps;
use till_core::{DiscountPolicy, LoyaltyMode, Money};
use till_store::store::{DEFAULT_INVENTORY_FILE, DEFAULT_ORDERS_FILE, DEFAULT_PRODUCTS_FILE};
use till_store::StoreConfig;

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No config path available on this platform")]
    NoConfigPath,

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]`: how the till presents itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Shown in the welcome banner and on receipts.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Prefix for amounts, e.g. "Rs." or "$".
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Till Fast Food".to_string()
}

fn default_currency_symbol() -> String {
    "Rs.".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// `[data]`: where the JSON files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSection {
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_products_file")]
    pub products_file: String,

    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,

    #[serde(default = "default_orders_file")]
    pub orders_file: String,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_products_file() -> String {
    DEFAULT_PRODUCTS_FILE.to_string()
}

fn default_inventory_file() -> String {
    DEFAULT_INVENTORY_FILE.to_string()
}

fn default_orders_file() -> String {
    DEFAULT_ORDERS_FILE.to_string()
}

impl Default for DataSection {
    fn default() -> Self {
        DataSection {
            dir: default_data_dir(),
            products_file: default_products_file(),
            inventory_file: default_inventory_file(),
            orders_file: default_orders_file(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete till configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub data: DataSection,

    #[serde(default)]
    pub discounts: DiscountPolicy,
}

impl TillConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (till.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| {
                    ConfigError::Read {
                        path: path.clone(),
                        source,
                    }
                })?;
                config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Writes the configuration as TOML and returns where it went.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name must not be empty".into()));
        }

        let files = [
            &self.data.products_file,
            &self.data.inventory_file,
            &self.data.orders_file,
        ];
        if files.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid("data file names must not be empty".into()));
        }
        if files.iter().collect::<HashSet<_>>().len() != files.len() {
            return Err(ConfigError::Invalid(
                "products, inventory and orders must be different files".into(),
            ));
        }

        let policy = &self.discounts;
        let rates = [
            ("discounts.card_bps", policy.card_bps),
            ("discounts.cash_bps", policy.cash_bps),
            ("discounts.returning_customer_bps", policy.returning_customer_bps),
            ("discounts.loyalty_bps", policy.loyalty_bps),
        ];
        for (field, bps) in rates {
            validate_discount_bps(field, bps).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        for (item, &bps) in &policy.item_overrides {
            validate_discount_bps(&format!("discounts.item_overrides.{item}"), bps)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        Ok(())
    }

    /// Applies `TILL_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("TILL_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.data.dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("TILL_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(symbol) = lookup("TILL_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Some(mode) = lookup("TILL_LOYALTY_MODE") {
            match mode.parse::<LoyaltyMode>() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding loyalty mode from environment");
                    self.discounts.loyalty_mode = parsed;
                }
                Err(reason) => warn!(%reason, "Ignoring TILL_LOYALTY_MODE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "pos")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }

    /// Store location derived from `[data]`.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(&self.data.dir)
            .products_file(&self.data.products_file)
            .inventory_file(&self.data.inventory_file)
            .orders_file(&self.data.orders_file)
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use till_console::config::TillConfig;
    /// use till_core::Money;
    ///
    /// let config = TillConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "Rs.12.34");
    /// assert_eq!(config.format_currency(Money::from_cents(-500)), "-Rs.5.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let magnitude = Money::from_cents(amount.cents().saturating_abs());
        format!("{}{}{}", sign, self.store.currency_symbol, magnitude)
    }
}
