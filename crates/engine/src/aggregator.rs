//! Cached wallet balance recomputation.
//!
//! The ledger is the source of truth; `current_balance` on a wallet is a
//! denormalized read-path cache. Recomputation replays the cache from the
//! matching entries and must run after anything that touches a wallet's
//! entries. Callers treat the cached value as eventually consistent.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use moneta_shared::types::{PeriodId, WalletId};

use crate::error::EngineError;
use crate::store::{LedgerStore, PeriodStore};

/// Recomputes cached wallet balances from ledger entries.
#[derive(Debug, Clone)]
pub struct BalanceAggregator<S> {
    store: S,
}

impl<S> BalanceAggregator<S>
where
    S: PeriodStore + LedgerStore,
{
    /// Creates an aggregator over the given store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Recomputes one wallet's cached balance and returns the new value.
    ///
    /// Sums the amounts of every entry matching both the wallet and the
    /// period, then writes the sum back as the wallet's `current_balance`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::WalletNotFound`] if the wallet does not
    /// exist, or a store error if reading or writing fails.
    pub async fn recompute(
        &self,
        wallet_id: WalletId,
        period_id: PeriodId,
    ) -> Result<Decimal, EngineError> {
        let wallet = self
            .store
            .find_wallet(wallet_id)
            .await?
            .ok_or(EngineError::WalletNotFound(wallet_id))?;

        let entries = self.store.entries_for_wallet(period_id, wallet_id).await?;
        let balance: Decimal = entries.iter().map(|e| e.amount).sum();

        self.store.write_wallet_balance(wallet.id, balance).await?;
        debug!(wallet_id = %wallet_id, balance = %balance, "Wallet balance recomputed");
        Ok(balance)
    }

    /// Recomputes a batch of wallets after an entry batch has committed.
    ///
    /// Failures here never unwind the committed batch: each one is logged
    /// and the stale cache is repaired by the next recompute trigger.
    pub async fn refresh_many(&self, period_id: PeriodId, wallet_ids: &[WalletId]) {
        for &wallet_id in wallet_ids {
            if let Err(error) = self.recompute(wallet_id, period_id).await {
                warn!(
                    wallet_id = %wallet_id,
                    error = %error,
                    "Balance refresh failed, cache left stale"
                );
            }
        }
    }
}
