//! Wallet resolution against a period's wallet directory.
//!
//! Wallets are provisioned together with their period, but a reader may see
//! the period before its default wallet is visible. The resolver absorbs that
//! gap by re-reading the directory with exponential backoff while the default
//! wallet is missing. If it never appears, lookups by id and name keep
//! working and only the default fallback comes up empty.

use std::time::Duration;

use tracing::warn;

use moneta_core::wallet::{Wallet, WalletDirectory, WalletRef};
use moneta_shared::config::ResolverConfig;
use moneta_shared::types::PeriodId;

use crate::error::EngineError;
use crate::store::PeriodStore;

/// Resolves wallet references within a single period.
#[derive(Debug, Clone)]
pub struct WalletResolver<S> {
    store: S,
    config: ResolverConfig,
}

impl<S: PeriodStore> WalletResolver<S> {
    /// Creates a resolver over the given store.
    #[must_use]
    pub const fn new(store: S, config: ResolverConfig) -> Self {
        Self { store, config }
    }

    /// Loads the period's wallet directory, retrying while it has no
    /// default wallet.
    ///
    /// Each retry doubles the wait (or whatever multiplier is configured).
    /// Once the attempt budget is spent the last directory is returned as
    /// is: references that match by id or name still resolve, and only
    /// fallback lookups come up empty.
    pub async fn directory_for(&self, period_id: PeriodId) -> Result<WalletDirectory, EngineError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut delay_ms = self.config.initial_backoff_ms;
        let mut attempt = 1;

        loop {
            let wallets = self.store.wallets_in_period(period_id).await?;
            let directory = WalletDirectory::from_wallets(wallets);
            if directory.has_default() {
                return Ok(directory);
            }
            if attempt >= max_attempts {
                warn!(
                    period_id = %period_id,
                    attempts = attempt,
                    "No default wallet appeared, resolution has no fallback"
                );
                return Ok(directory);
            }

            warn!(
                period_id = %period_id,
                attempt,
                delay_ms,
                "Default wallet not visible yet, retrying"
            );
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            delay_ms = delay_ms.saturating_mul(u64::from(self.config.backoff_multiplier));
            attempt += 1;
        }
    }

    /// Resolves one reference to a concrete wallet in the period.
    ///
    /// Follows the directory cascade: id first, then normalized name, then
    /// the period's default wallet. Returns
    /// [`EngineError::WalletResolutionFailed`] only when nothing matched
    /// and the period has no default wallet to fall back to.
    pub async fn resolve(
        &self,
        period_id: PeriodId,
        wallet_ref: &WalletRef,
    ) -> Result<Wallet, EngineError> {
        let directory = self.directory_for(period_id).await?;
        directory
            .resolve(wallet_ref)
            .cloned()
            .ok_or(EngineError::WalletResolutionFailed(period_id))
    }
}
