//! Wallets, wallet references, and name resolution.
//!
//! A wallet is a named spending bucket scoped to one period. Recurrence
//! rules and migrated entries point at wallets loosely, by id and/or name,
//! because wallet ids change at every period rollover while names persist.
//! [`WalletDirectory`] turns those loose references into concrete wallets.

pub mod directory;
pub mod types;

pub use directory::WalletDirectory;
pub use types::{Wallet, WalletRef};
