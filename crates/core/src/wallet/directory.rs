//! Per-period wallet lookup and reference resolution.

use std::collections::HashMap;

use moneta_shared::types::WalletId;

use super::types::{Wallet, WalletRef};

/// Normalized name key for case-insensitive matching.
fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lookup table over one period's wallets.
///
/// Resolution order for a [`WalletRef`]:
///
/// 1. the referenced id, if that wallet exists in this period;
/// 2. a case-insensitive, trimmed match on the name snapshot;
/// 3. the period's default wallet.
///
/// Only a directory without a default wallet can fail to resolve.
#[derive(Debug, Clone)]
pub struct WalletDirectory {
    by_id: HashMap<WalletId, Wallet>,
    by_name: HashMap<String, WalletId>,
    default_id: Option<WalletId>,
}

impl WalletDirectory {
    /// Builds a directory from one period's wallets.
    ///
    /// When two wallets normalize to the same name, or more than one is
    /// flagged as default, the first one listed wins.
    #[must_use]
    pub fn from_wallets(wallets: Vec<Wallet>) -> Self {
        let mut by_id = HashMap::with_capacity(wallets.len());
        let mut by_name = HashMap::with_capacity(wallets.len());
        let mut default_id = None;

        for wallet in wallets {
            by_name.entry(name_key(&wallet.name)).or_insert(wallet.id);
            if wallet.is_default && default_id.is_none() {
                default_id = Some(wallet.id);
            }
            by_id.insert(wallet.id, wallet);
        }

        Self {
            by_id,
            by_name,
            default_id,
        }
    }

    /// Resolves a loose reference to a concrete wallet.
    #[must_use]
    pub fn resolve(&self, wallet_ref: &WalletRef) -> Option<&Wallet> {
        if let Some(id) = wallet_ref.id {
            if let Some(wallet) = self.by_id.get(&id) {
                return Some(wallet);
            }
        }
        if let Some(name) = &wallet_ref.name {
            if let Some(wallet) = self.find_by_name(name) {
                return Some(wallet);
            }
        }
        self.default_wallet()
    }

    /// Looks up a wallet by name without falling back to the default.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Wallet> {
        self.by_name
            .get(&name_key(name))
            .and_then(|id| self.by_id.get(id))
    }

    /// Looks up a wallet by id.
    #[must_use]
    pub fn get(&self, id: WalletId) -> Option<&Wallet> {
        self.by_id.get(&id)
    }

    /// The period's default wallet, if one exists.
    #[must_use]
    pub fn default_wallet(&self) -> Option<&Wallet> {
        self.default_id.and_then(|id| self.by_id.get(&id))
    }

    /// Returns true if the period has a default wallet.
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_id.is_some()
    }

    /// Number of wallets in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if the directory holds no wallets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneta_shared::types::{AccountId, PeriodId};
    use rust_decimal_macros::dec;

    fn wallet(period_id: PeriodId, name: &str, is_default: bool) -> Wallet {
        Wallet::new(AccountId::new(), period_id, name.to_string(), dec!(100), is_default)
    }

    fn directory() -> (WalletDirectory, Vec<WalletId>) {
        let period_id = PeriodId::new();
        let wallets = vec![
            wallet(period_id, "Main", true),
            wallet(period_id, "Groceries", false),
            wallet(period_id, "Rent", false),
        ];
        let ids = wallets.iter().map(|w| w.id).collect();
        (WalletDirectory::from_wallets(wallets), ids)
    }

    #[test]
    fn test_resolve_prefers_id() {
        let (dir, ids) = directory();
        let resolved = dir.resolve(&WalletRef::new(ids[2], "Groceries")).unwrap();
        // The id wins even though the name snapshot points elsewhere.
        assert_eq!(resolved.id, ids[2]);
    }

    #[test]
    fn test_stale_id_falls_back_to_name() {
        let (dir, ids) = directory();
        let stale = WalletRef::new(WalletId::new(), "Groceries");
        let resolved = dir.resolve(&stale).unwrap();
        assert_eq!(resolved.id, ids[1]);
    }

    #[test]
    fn test_name_match_ignores_case_and_whitespace() {
        let (dir, ids) = directory();
        let resolved = dir.resolve(&WalletRef::by_name("  gRoCeRiEs ")).unwrap();
        assert_eq!(resolved.id, ids[1]);
    }

    #[test]
    fn test_unknown_reference_falls_back_to_default() {
        let (dir, ids) = directory();
        let resolved = dir.resolve(&WalletRef::by_name("Vacation")).unwrap();
        assert_eq!(resolved.id, ids[0]);
        assert!(resolved.is_default);
    }

    #[test]
    fn test_empty_reference_resolves_to_default() {
        let (dir, ids) = directory();
        let resolved = dir.resolve(&WalletRef::default_wallet()).unwrap();
        assert_eq!(resolved.id, ids[0]);
    }

    #[test]
    fn test_resolution_fails_without_default() {
        let period_id = PeriodId::new();
        let dir = WalletDirectory::from_wallets(vec![wallet(period_id, "Groceries", false)]);

        assert!(!dir.has_default());
        assert!(dir.resolve(&WalletRef::by_name("Vacation")).is_none());
        // A direct hit still resolves.
        assert!(dir.resolve(&WalletRef::by_name("Groceries")).is_some());
    }

    #[test]
    fn test_duplicate_names_first_listed_wins() {
        let period_id = PeriodId::new();
        let first = wallet(period_id, "Bills", true);
        let first_id = first.id;
        let dir = WalletDirectory::from_wallets(vec![first, wallet(period_id, "bills ", false)]);

        assert_eq!(dir.len(), 2);
        assert_eq!(dir.find_by_name("BILLS").unwrap().id, first_id);
    }

    #[test]
    fn test_find_by_name_has_no_fallback() {
        let (dir, _) = directory();
        assert!(dir.find_by_name("Vacation").is_none());
    }
}
