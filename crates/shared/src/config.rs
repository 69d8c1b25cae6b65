//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reconciliation engine configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
    /// Order cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// How aggregate totals are spread across line items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProrationMode {
    /// Plain decimal arithmetic; allocations may differ from the total by a tiny remainder.
    #[default]
    Exact,
    /// Rounded to `amount_scale` with the Largest Remainder Method (sum is exact).
    LargestRemainder,
}

/// Reconciliation engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconciliationConfig {
    /// Decimal places quantities are rounded to when reported.
    #[serde(default = "default_quantity_scale")]
    pub quantity_scale: u32,
    /// Decimal places money is rounded to when rounding is requested.
    #[serde(default = "default_amount_scale")]
    pub amount_scale: u32,
    /// Proration strategy.
    #[serde(default)]
    pub proration: ProrationMode,
}

fn default_quantity_scale() -> u32 {
    4
}

fn default_amount_scale() -> u32 {
    2
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            quantity_scale: default_quantity_scale(),
            amount_scale: default_amount_scale(),
            proration: ProrationMode::default(),
        }
    }
}

/// Order cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached orders.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live in seconds for each cached entry.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_max_capacity() -> u64 {
    1000
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Every setting has a default, so a missing `config/` directory is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if a present source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PROCURA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
