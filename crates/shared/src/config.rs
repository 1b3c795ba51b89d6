//! Engine configuration management.

use serde::Deserialize;

/// Engine configuration.
///
/// Every field has a sensible default, so an embedder without config files
/// can start from [`EngineConfig::default`] and override selectively.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Wallet resolution retry policy.
    pub resolver: ResolverConfig,
    /// Recurrence expansion limits.
    pub expansion: ExpansionConfig,
}

/// Retry policy for wallet resolution.
///
/// A period's default wallet is created by a separate writer and may not be
/// visible yet when materialization starts. The resolver re-reads the wallet
/// set with exponential backoff instead of sleeping a fixed interval.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of wallet fetch attempts before giving up.
    pub max_attempts: u32,
    /// Delay before the second attempt, in milliseconds.
    pub initial_backoff_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    pub backoff_multiplier: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 50,
            backoff_multiplier: 2,
        }
    }
}

/// Limits applied when expanding recurrence rules into occurrence dates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Hard cap on occurrences generated per rule per window.
    pub max_occurrences_per_rule: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            max_occurrences_per_rule: 1000,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MONETA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
