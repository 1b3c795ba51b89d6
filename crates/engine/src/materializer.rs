//! Rule materialization into a period.
//!
//! Turns the account's recurrence rules into concrete ledger entries for
//! one period. The run is idempotent: each occurrence carries the natural
//! key `(rule, period, date)`, and occurrences whose key already exists in
//! the ledger are counted as duplicates instead of being written again.
//!
//! All generated entries for one invocation are committed as a single
//! atomic batch. Per-rule problems (validation, unresolvable wallet) skip
//! that rule and are recorded in the report; they never abort the run.

use serde::Serialize;
use tracing::{info, warn};

use moneta_core::ledger::{LedgerEntry, OccurrenceKey};
use moneta_core::period::Period;
use moneta_core::recurrence::{RecurrenceRule, occurrences_in};
use moneta_shared::EngineConfig;
use moneta_shared::types::{PeriodId, RecurrenceRuleId, WalletId};

use crate::aggregator::BalanceAggregator;
use crate::error::EngineError;
use crate::resolver::WalletResolver;
use crate::store::{LedgerStore, PeriodStore};

/// One rule left out of a materialization run, with the reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRule {
    /// The rule that was skipped.
    pub rule_id: RecurrenceRuleId,
    /// The rule's description, for display.
    pub description: String,
    /// Why the rule contributed no entries.
    pub reason: String,
}

impl SkippedRule {
    fn new(rule: &RecurrenceRule, reason: impl Into<String>) -> Self {
        Self {
            rule_id: rule.id,
            description: rule.description.clone(),
            reason: reason.into(),
        }
    }
}

/// Outcome of one materialization run.
///
/// The caller decides what to refresh from these counts; the engine does
/// not invalidate any caches beyond the wallet balances it recomputes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeReport {
    /// Period the run wrote into.
    pub period_id: PeriodId,
    /// Entries written by this run.
    pub generated_count: usize,
    /// Occurrences skipped because their key already existed.
    pub duplicate_count: usize,
    /// Rules that contributed nothing, with reasons.
    pub skipped: Vec<SkippedRule>,
    /// Wallets that received at least one new entry.
    pub touched_wallets: Vec<WalletId>,
}

impl MaterializeReport {
    fn new(period_id: PeriodId) -> Self {
        Self {
            period_id,
            generated_count: 0,
            duplicate_count: 0,
            skipped: Vec::new(),
            touched_wallets: Vec::new(),
        }
    }
}

/// Materializes recurrence rules into ledger entries.
#[derive(Debug, Clone)]
pub struct Materializer<S> {
    store: S,
    config: EngineConfig,
}

impl<S> Materializer<S>
where
    S: PeriodStore + LedgerStore + Clone,
{
    /// Creates a materializer over the given store.
    #[must_use]
    pub const fn new(store: S, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Materializes the given rules into the period.
    ///
    /// Inactive rules and rules owned by other accounts are ignored. An
    /// empty rule set is a successful no-op, so period creation never fails
    /// on a quiet account.
    ///
    /// # Errors
    ///
    /// Fails before writing anything if the period is missing, closed, or
    /// carries an inverted window. [`EngineError::BatchWriteFailed`] means
    /// the whole batch was rejected and nothing was persisted.
    pub async fn materialize(
        &self,
        period_id: PeriodId,
        rules: &[RecurrenceRule],
    ) -> Result<MaterializeReport, EngineError> {
        let period = self.load_open_period(period_id).await?;
        self.run(&period, rules).await
    }

    /// Materializes every rule of the period's account into the period.
    ///
    /// Convenience wrapper that pulls the rules from the store first.
    ///
    /// # Errors
    ///
    /// Same as [`Materializer::materialize`].
    pub async fn materialize_for_account(
        &self,
        period_id: PeriodId,
    ) -> Result<MaterializeReport, EngineError> {
        let period = self.load_open_period(period_id).await?;
        let rules = self.store.rules_for_account(period.account_id).await?;
        self.run(&period, &rules).await
    }

    async fn load_open_period(&self, period_id: PeriodId) -> Result<Period, EngineError> {
        let period = self
            .store
            .find_period(period_id)
            .await?
            .ok_or(EngineError::PeriodNotFound(period_id))?;
        if !period.is_open() {
            return Err(EngineError::PeriodClosed(period_id));
        }
        Ok(period)
    }

    async fn run(
        &self,
        period: &Period,
        rules: &[RecurrenceRule],
    ) -> Result<MaterializeReport, EngineError> {
        let window = period
            .window()
            .map_err(|_| EngineError::InvalidPeriodWindow {
                period_id: period.id,
                start: period.start_date,
                end: period.end_date,
            })?;

        let mut report = MaterializeReport::new(period.id);
        let applicable: Vec<&RecurrenceRule> = rules
            .iter()
            .filter(|rule| rule.active && rule.account_id == period.account_id)
            .collect();
        if applicable.is_empty() {
            info!(period_id = %period.id, "No applicable rules, nothing to materialize");
            return Ok(report);
        }

        let resolver = WalletResolver::new(self.store.clone(), self.config.resolver.clone());
        let directory = resolver.directory_for(period.id).await?;

        let mut existing = self.store.occurrence_keys_in_period(period.id).await?;
        let cap = self.config.expansion.max_occurrences_per_rule;
        let mut batch = Vec::new();

        for rule in applicable {
            let dates = match occurrences_in(rule, window, cap) {
                Ok(dates) => dates,
                Err(error) => {
                    warn!(rule_id = %rule.id, error = %error, "Rule failed validation, skipping");
                    report.skipped.push(SkippedRule::new(rule, error.to_string()));
                    continue;
                }
            };
            if dates.is_empty() {
                continue;
            }
            if dates.len() == cap {
                warn!(rule_id = %rule.id, cap, "Expansion hit the occurrence cap");
            }

            let Some(wallet) = directory.resolve(&rule.wallet_reference) else {
                warn!(rule_id = %rule.id, "No wallet match and no default wallet, skipping");
                report
                    .skipped
                    .push(SkippedRule::new(rule, "no wallet match and no default wallet"));
                continue;
            };

            for date in dates {
                let key = OccurrenceKey {
                    rule_id: rule.id,
                    period_id: period.id,
                    date,
                };
                if !existing.insert(key) {
                    report.duplicate_count += 1;
                    continue;
                }

                batch.push(LedgerEntry::from_rule(rule, period.id, wallet.id, date));
                if !report.touched_wallets.contains(&wallet.id) {
                    report.touched_wallets.push(wallet.id);
                }
            }
        }

        if batch.is_empty() {
            info!(
                period_id = %period.id,
                duplicates = report.duplicate_count,
                "Nothing new to materialize"
            );
            return Ok(report);
        }

        report.generated_count = batch.len();
        self.store
            .insert_entries(batch)
            .await
            .map_err(EngineError::BatchWriteFailed)?;

        let aggregator = BalanceAggregator::new(self.store.clone());
        aggregator
            .refresh_many(period.id, &report.touched_wallets)
            .await;

        info!(
            period_id = %period.id,
            generated = report.generated_count,
            duplicates = report.duplicate_count,
            skipped = report.skipped.len(),
            "Materialization complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "materializer_tests.rs"]
mod tests;
