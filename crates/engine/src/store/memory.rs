//! In-process document store.
//!
//! Holds every record as a `serde_json` document, the same shape the
//! production store persists, so the camelCase wire format is exercised on
//! every read and write. Intended for tests and embedded use.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::RwLock;

use moneta_core::ledger::LedgerEntry;
use moneta_core::period::Period;
use moneta_core::recurrence::RecurrenceRule;
use moneta_core::wallet::Wallet;
use moneta_shared::types::{AccountId, LedgerEntryId, PeriodId, RecurrenceRuleId, WalletId};

use super::{LedgerStore, PeriodStore, StoreError};

#[derive(Debug, Default)]
struct Documents {
    periods: HashMap<PeriodId, Value>,
    wallets: HashMap<WalletId, Value>,
    rules: HashMap<RecurrenceRuleId, Value>,
    entries: HashMap<LedgerEntryId, Value>,
}

/// Thread-safe in-memory document store.
///
/// Clones share the same underlying documents, mirroring how database
/// connection handles behave.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    docs: Arc<RwLock<Documents>>,
}

fn decode<T: DeserializeOwned>(doc: &Value) -> Result<T, StoreError> {
    serde_json::from_value(doc.clone()).map_err(StoreError::from)
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a period document.
    pub async fn put_period(&self, period: &Period) -> Result<(), StoreError> {
        let doc = serde_json::to_value(period)?;
        self.docs.write().await.periods.insert(period.id, doc);
        Ok(())
    }

    /// Inserts or replaces a wallet document.
    pub async fn put_wallet(&self, wallet: &Wallet) -> Result<(), StoreError> {
        let doc = serde_json::to_value(wallet)?;
        self.docs.write().await.wallets.insert(wallet.id, doc);
        Ok(())
    }

    /// Inserts or replaces a recurrence rule document.
    pub async fn put_rule(&self, rule: &RecurrenceRule) -> Result<(), StoreError> {
        let doc = serde_json::to_value(rule)?;
        self.docs.write().await.rules.insert(rule.id, doc);
        Ok(())
    }

    /// Inserts or replaces a single ledger entry document.
    pub async fn put_entry(&self, entry: &LedgerEntry) -> Result<(), StoreError> {
        let doc = serde_json::to_value(entry)?;
        self.docs.write().await.entries.insert(entry.id, doc);
        Ok(())
    }
}

#[async_trait]
impl PeriodStore for MemoryStore {
    async fn find_period(&self, id: PeriodId) -> Result<Option<Period>, StoreError> {
        let docs = self.docs.read().await;
        docs.periods.get(&id).map(decode).transpose()
    }

    async fn wallets_in_period(&self, period_id: PeriodId) -> Result<Vec<Wallet>, StoreError> {
        let docs = self.docs.read().await;
        let mut wallets = Vec::new();
        for doc in docs.wallets.values() {
            let wallet: Wallet = decode(doc)?;
            if wallet.period_id == period_id {
                wallets.push(wallet);
            }
        }
        wallets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(wallets)
    }

    async fn find_wallet(&self, id: WalletId) -> Result<Option<Wallet>, StoreError> {
        let docs = self.docs.read().await;
        docs.wallets.get(&id).map(decode).transpose()
    }

    async fn rules_for_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<RecurrenceRule>, StoreError> {
        let docs = self.docs.read().await;
        let mut rules = Vec::new();
        for doc in docs.rules.values() {
            let rule: RecurrenceRule = decode(doc)?;
            if rule.account_id == account_id {
                rules.push(rule);
            }
        }
        rules.sort_by(|a, b| {
            a.description
                .cmp(&b.description)
                .then_with(|| a.id.into_inner().cmp(&b.id.into_inner()))
        });
        Ok(rules)
    }

    async fn write_wallet_balance(
        &self,
        id: WalletId,
        balance: Decimal,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let Some(doc) = docs.wallets.get(&id) else {
            return Err(StoreError::Conflict(format!("wallet {id} does not exist")));
        };

        let mut wallet: Wallet = decode(doc)?;
        wallet.current_balance = balance;
        wallet.updated_at = Utc::now();

        let doc = serde_json::to_value(&wallet)?;
        docs.wallets.insert(id, doc);
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn entries_in_period(
        &self,
        period_id: PeriodId,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let docs = self.docs.read().await;
        let mut entries = Vec::new();
        for doc in docs.entries.values() {
            let entry: LedgerEntry = decode(doc)?;
            if entry.period_id == period_id {
                entries.push(entry);
            }
        }
        entries.sort_by_key(|e| (e.date, e.id.into_inner()));
        Ok(entries)
    }

    async fn entries_for_wallet(
        &self,
        period_id: PeriodId,
        wallet_id: WalletId,
    ) -> Result<Vec<LedgerEntry>, StoreError> {
        let docs = self.docs.read().await;
        let mut entries = Vec::new();
        for doc in docs.entries.values() {
            let entry: LedgerEntry = decode(doc)?;
            if entry.period_id == period_id && entry.wallet_id == wallet_id {
                entries.push(entry);
            }
        }
        entries.sort_by_key(|e| (e.date, e.id.into_inner()));
        Ok(entries)
    }

    async fn insert_entries(&self, entries: Vec<LedgerEntry>) -> Result<(), StoreError> {
        // Encode and check the whole batch before touching the map, so a
        // rejected batch leaves the store untouched.
        let mut encoded = Vec::with_capacity(entries.len());
        {
            let docs = self.docs.read().await;
            for entry in &entries {
                if docs.entries.contains_key(&entry.id) {
                    return Err(StoreError::Conflict(format!(
                        "entry {} already exists",
                        entry.id
                    )));
                }
                encoded.push((entry.id, serde_json::to_value(entry)?));
            }
        }

        let mut seen = HashSet::with_capacity(encoded.len());
        for (id, _) in &encoded {
            if !seen.insert(*id) {
                return Err(StoreError::Conflict(format!(
                    "entry {id} appears twice in the batch"
                )));
            }
        }

        let mut docs = self.docs.write().await;
        for (id, doc) in encoded {
            docs.entries.insert(id, doc);
        }
        Ok(())
    }
}
