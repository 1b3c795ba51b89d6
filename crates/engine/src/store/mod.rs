//! Storage collaborators consumed by the engine.
//!
//! The engine does not own a database. It reads budget structure (periods,
//! wallets, rules) and ledger facts (entries) through these traits and
//! writes through them the same way. Production wires them to the
//! application's document store; tests and embedded use get
//! [`MemoryStore`].
//!
//! `insert_entries` is the one batch operation and MUST be atomic:
//! implementations reject the whole batch or persist all of it.

use std::collections::HashSet;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;

use moneta_core::ledger::{LedgerEntry, OccurrenceKey};
use moneta_core::period::Period;
use moneta_core::recurrence::RecurrenceRule;
use moneta_core::wallet::Wallet;
use moneta_shared::types::{AccountId, PeriodId, WalletId};

pub mod memory;

pub use memory::MemoryStore;

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A write collided with existing state (e.g., duplicate document id).
    #[error("Write conflict: {0}")]
    Conflict(String),

    /// A document could not be encoded or decoded.
    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Returns true if the same request may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Read and write access to budget structure: periods, wallets, rules.
#[async_trait]
pub trait PeriodStore: Send + Sync {
    /// Finds a period by id.
    async fn find_period(&self, id: PeriodId) -> Result<Option<Period>, StoreError>;

    /// Lists all wallets belonging to a period.
    async fn wallets_in_period(&self, period_id: PeriodId) -> Result<Vec<Wallet>, StoreError>;

    /// Finds a wallet by id.
    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, StoreError>;

    /// Lists all recurrence rules owned by an account, active or not.
    async fn rules_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<RecurrenceRule>, StoreError>;

    /// Overwrites a wallet's cached balance.
    async fn write_wallet_balance(
        &self,
        id: WalletId,
        balance: Decimal,
    ) -> Result<(), StoreError>;
}

/// Read and write access to ledger entries.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Lists all entries recorded in a period.
    async fn entries_in_period(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Lists the entries spending from one wallet within one period.
    async fn entries_for_wallet(
        &self,
        period_id: PeriodId,
        wallet_id: WalletId,
    ) -> Result<Vec<LedgerEntry>, StoreError>;

    /// Lists a period's entries flagged as recurring.
    async fn recurring_entries_in_period(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let entries = self.entries_in_period(period_id).await?;
        Ok(entries.into_iter().filter(|e| e.recurring).collect())
    }

    /// Occurrence keys of a period's rule-generated entries.
    ///
    /// Backends with an index on the key triple should override this; the
    /// default scans the period's entries.
    async fn occurrence_keys_in_period(
        &self,
        period_id: PeriodId,
    ) -> Result<HashSet<OccurrenceKey>, StoreError> {
        let entries = self.entries_in_period(period_id).await?;
        Ok(entries
            .iter()
            .filter_map(LedgerEntry::occurrence_key)
            .collect())
    }

    /// Persists a batch of entries atomically.
    ///
    /// Either every entry is written or none is.
    async fn insert_entries(&self, entries: Vec<LedgerEntry>) -> Result<(), StoreError>;
}
