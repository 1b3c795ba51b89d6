//! Ledger entries and occurrence identity.
//!
//! Entries are the source of truth for spending; wallet balances are
//! derived caches. Entries produced from recurrence rules carry their
//! originating rule so regeneration stays idempotent.

pub mod types;

pub use types::{LedgerEntry, OccurrenceKey};
