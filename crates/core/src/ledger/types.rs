//! Ledger entry data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{AccountId, LedgerEntryId, PeriodId, RecurrenceRuleId, WalletId};

use crate::recurrence::RecurrenceRule;

/// Natural identity of a rule-generated entry.
///
/// A rule fires at most once per date per period, so this triple uniquely
/// identifies an occurrence. Regenerating entries for a period skips any
/// occurrence whose key already exists in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccurrenceKey {
    /// Rule that generated the entry.
    pub rule_id: RecurrenceRuleId,
    /// Period the entry was generated into.
    pub period_id: PeriodId,
    /// Date the rule fired on.
    pub date: NaiveDate,
}

/// One dated spend record.
///
/// Serialized field names follow the camelCase document shape of the
/// backing store. `recurring` marks handmade entries that should be carried
/// into the next period at rollover; entries generated from rules are not
/// marked, because the rule itself regenerates them in the new period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Unique identifier.
    pub id: LedgerEntryId,
    /// Account this entry belongs to.
    pub account_id: AccountId,
    /// Period the entry is recorded in.
    pub period_id: PeriodId,
    /// Wallet the entry spends from.
    pub wallet_id: WalletId,
    /// Day the spend falls on. Engine-written entries always sit inside the
    /// period's window.
    pub date: NaiveDate,
    /// Spend amount. Positive for ordinary spending.
    pub amount: Decimal,
    /// Spending category.
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the entry migrates to the next period at rollover.
    pub recurring: bool,
    /// Rule that generated this entry, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_rule_id: Option<RecurrenceRuleId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// Creates a handmade entry with no category or tags.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        period_id: PeriodId,
        wallet_id: WalletId,
        amount: Decimal,
        date: NaiveDate,
        recurring: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerEntryId::new(),
            account_id,
            period_id,
            wallet_id,
            date,
            amount,
            category: None,
            tags: Vec::new(),
            recurring,
            source_rule_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materializes one occurrence of a rule as a concrete entry.
    ///
    /// The entry copies the rule's amount, category, and tags, and records
    /// the rule as its source. It is not flagged `recurring`: the rule
    /// regenerates it in the next period, and flagging it would double it
    /// up at rollover.
    #[must_use]
    pub fn from_rule(
        rule: &RecurrenceRule,
        period_id: PeriodId,
        wallet_id: WalletId,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerEntryId::new(),
            account_id: rule.account_id,
            period_id,
            wallet_id,
            date,
            amount: rule.amount,
            category: rule.category.clone(),
            tags: rule.tags.clone(),
            recurring: false,
            source_rule_id: Some(rule.id),
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies this entry into another period.
    ///
    /// Everything is carried over verbatim except the identity fields: the
    /// copy gets a fresh id, the destination period and wallet, and the
    /// translated date. A recurring copy stays recurring, so it keeps
    /// migrating at every following rollover.
    #[must_use]
    pub fn migrated_copy(&self, period_id: PeriodId, wallet_id: WalletId, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: LedgerEntryId::new(),
            account_id: self.account_id,
            period_id,
            wallet_id,
            date,
            amount: self.amount,
            category: self.category.clone(),
            tags: self.tags.clone(),
            recurring: self.recurring,
            source_rule_id: self.source_rule_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// The entry's occurrence key, when it was generated from a rule.
    #[must_use]
    pub fn occurrence_key(&self) -> Option<OccurrenceKey> {
        self.source_rule_id.map(|rule_id| OccurrenceKey {
            rule_id,
            period_id: self.period_id,
            date: self.date,
        })
    }
}
