//! Wallet data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_shared::types::{AccountId, PeriodId, WalletId};

/// A named spending bucket scoped to one period.
///
/// `current_balance` is a cached aggregate; the ledger is the source of
/// truth and the aggregator rewrites the cache from entries. Wallets are
/// recreated each cycle, so only the name carries identity across periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Unique identifier.
    pub id: WalletId,
    /// Account this wallet belongs to.
    pub account_id: AccountId,
    /// Period this wallet belongs to.
    pub period_id: PeriodId,
    /// Display name, unique per period case-insensitively.
    pub name: String,
    /// Spending limit for the period.
    pub limit: Decimal,
    /// Cached sum of the wallet's ledger entry amounts.
    pub current_balance: Decimal,
    /// Whether this is the period's default wallet.
    pub is_default: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Creates a wallet with a zero cached balance.
    #[must_use]
    pub fn new(
        account_id: AccountId,
        period_id: PeriodId,
        name: String,
        limit: Decimal,
        is_default: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: WalletId::new(),
            account_id,
            period_id,
            name,
            limit,
            current_balance: Decimal::ZERO,
            is_default,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A loose reference to a wallet, carried by rules and resolved per period.
///
/// Either field may be absent. An id is only trusted while the wallet still
/// exists in the target period; the name survives rollovers and is matched
/// case-insensitively after trimming. An empty reference means "use the
/// period's default wallet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRef {
    /// Wallet id, if one was captured when the reference was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WalletId>,
    /// Wallet name snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl WalletRef {
    /// Reference by id with a name snapshot.
    #[must_use]
    pub fn new(id: WalletId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    /// Reference by name only.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// Empty reference, resolving to the period's default wallet.
    #[must_use]
    pub fn default_wallet() -> Self {
        Self::default()
    }

    /// Returns true if neither id nor name is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}
