//! Recurring-entry migration across period rollovers.
//!
//! Copies every entry flagged as recurring from a source period into a
//! destination period, preserving each entry's day offset from the start
//! of its period. Wallets are remapped by name because wallet documents
//! are scoped to one period; an entry whose wallet has no counterpart in
//! the destination falls back to the destination's default wallet.
//!
//! The copies are committed as a single atomic batch. Per-entry problems
//! skip that entry and are recorded in the report; they never abort the
//! run.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use moneta_core::dates::DateWindow;
use moneta_core::ledger::LedgerEntry;
use moneta_core::period::Period;
use moneta_core::wallet::{WalletDirectory, WalletRef};
use moneta_shared::EngineConfig;
use moneta_shared::types::{LedgerEntryId, PeriodId, WalletId};

use crate::aggregator::BalanceAggregator;
use crate::error::EngineError;
use crate::resolver::WalletResolver;
use crate::store::{LedgerStore, PeriodStore};

/// A recurring entry the migration left behind, with the reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedEntry {
    /// The source entry that was not copied.
    pub entry_id: LedgerEntryId,
    /// The source entry's date.
    pub date: NaiveDate,
    /// Human-readable reason for the skip.
    pub reason: String,
}

impl SkippedEntry {
    fn new(entry: &LedgerEntry, reason: impl Into<String>) -> Self {
        Self {
            entry_id: entry.id,
            date: entry.date,
            reason: reason.into(),
        }
    }
}

/// Outcome of one migration run.
///
/// `touched_wallets` lists the destination wallets that received copies,
/// in first-touched order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrateReport {
    /// The period the entries were copied from.
    pub source_period_id: PeriodId,
    /// The period the entries were copied into.
    pub dest_period_id: PeriodId,
    /// Entries written this run.
    pub copied_count: usize,
    /// Entries left behind, with reasons.
    pub skipped: Vec<SkippedEntry>,
    /// Destination wallets whose balances were recomputed.
    pub touched_wallets: Vec<WalletId>,
}

impl MigrateReport {
    fn new(source_period_id: PeriodId, dest_period_id: PeriodId) -> Self {
        Self {
            source_period_id,
            dest_period_id,
            copied_count: 0,
            skipped: Vec::new(),
            touched_wallets: Vec::new(),
        }
    }
}

/// Copies recurring ledger entries from one period into the next.
#[derive(Debug, Clone)]
pub struct PeriodMigrator<S> {
    store: S,
    config: EngineConfig,
}

impl<S> PeriodMigrator<S>
where
    S: PeriodStore + LedgerStore + Clone,
{
    /// Creates a migrator over the given store.
    #[must_use]
    pub const fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Copies the source period's recurring entries into the destination.
    ///
    /// Each copy keeps the original's amount, category, and tags, gets a
    /// fresh id, and lands on the destination date at the same offset from
    /// the period start, pinned to the destination window when the new
    /// period is shorter. Entries not flagged as recurring are ignored; a
    /// source with none is a successful no-op that writes nothing.
    ///
    /// The source period may already be closed. The destination must be
    /// open.
    ///
    /// # Errors
    ///
    /// Fails before writing anything if either period is missing, the two
    /// are the same or belong to different accounts, the destination is
    /// closed, or either window is inverted. [`EngineError::BatchWriteFailed`]
    /// means the whole batch was rejected and nothing was persisted.
    pub async fn migrate(
        &self,
        source_period_id: PeriodId,
        dest_period_id: PeriodId,
    ) -> Result<MigrateReport, EngineError> {
        if source_period_id == dest_period_id {
            return Err(EngineError::SamePeriod(source_period_id));
        }

        let source = self.load_period(source_period_id).await?;
        let dest = self.load_period(dest_period_id).await?;
        if source.account_id != dest.account_id {
            return Err(EngineError::AccountMismatch {
                source_period: source.id,
                dest_period: dest.id,
            });
        }
        if !dest.is_open() {
            return Err(EngineError::PeriodClosed(dest.id));
        }
        let source_window = Self::window_of(&source)?;
        let dest_window = Self::window_of(&dest)?;

        let mut report = MigrateReport::new(source.id, dest.id);
        let recurring = self.store.recurring_entries_in_period(source.id).await?;
        if recurring.is_empty() {
            info!(
                source_period_id = %source.id,
                dest_period_id = %dest.id,
                "No recurring entries, nothing to migrate"
            );
            return Ok(report);
        }

        let source_directory =
            WalletDirectory::from_wallets(self.store.wallets_in_period(source.id).await?);
        let resolver = WalletResolver::new(self.store.clone(), self.config.resolver.clone());
        let directory = resolver.directory_for(dest.id).await?;

        let mut batch = Vec::new();
        for entry in &recurring {
            let offset = source_window.offset_from_start(entry.date);
            let date = dest_window.date_at_offset(offset);

            let reference = source_directory
                .get(entry.wallet_id)
                .map_or_else(WalletRef::default_wallet, |wallet| {
                    WalletRef::by_name(wallet.name.clone())
                });
            let Some(wallet) = directory.resolve(&reference) else {
                warn!(
                    entry_id = %entry.id,
                    "No wallet match and no default wallet, skipping"
                );
                report
                    .skipped
                    .push(SkippedEntry::new(entry, "no wallet match and no default wallet"));
                continue;
            };

            batch.push(entry.migrated_copy(dest.id, wallet.id, date));
            if !report.touched_wallets.contains(&wallet.id) {
                report.touched_wallets.push(wallet.id);
            }
        }

        if batch.is_empty() {
            info!(
                source_period_id = %source.id,
                dest_period_id = %dest.id,
                skipped = report.skipped.len(),
                "Nothing to migrate"
            );
            return Ok(report);
        }

        report.copied_count = batch.len();
        self.store
            .insert_entries(batch)
            .await
            .map_err(EngineError::BatchWriteFailed)?;

        let aggregator = BalanceAggregator::new(self.store.clone());
        aggregator
            .refresh_many(dest.id, &report.touched_wallets)
            .await;

        info!(
            source_period_id = %source.id,
            dest_period_id = %dest.id,
            copied = report.copied_count,
            skipped = report.skipped.len(),
            "Migration complete"
        );
        Ok(report)
    }

    async fn load_period(&self, period_id: PeriodId) -> Result<Period, EngineError> {
        self.store
            .find_period(period_id)
            .await?
            .ok_or(EngineError::PeriodNotFound(period_id))
    }

    fn window_of(period: &Period) -> Result<DateWindow, EngineError> {
        period.window().map_err(|_| EngineError::InvalidPeriodWindow {
            period_id: period.id,
            start: period.start_date,
            end: period.end_date,
        })
    }
}

#[cfg(test)]
#[path = "migrator_tests.rs"]
mod tests;
