//! Recurring-spend materialization and cross-period migration for Moneta.
//!
//! The engine turns recurrence rules into concrete ledger entries, carries
//! recurring entries across period rollovers, and keeps cached wallet
//! balances consistent with the ledger. It owns no storage: callers hand it
//! anything implementing the [`store`] traits, typically a handle onto the
//! application's document database or the bundled [`store::MemoryStore`].
//!
//! # Services
//!
//! - [`Materializer`] - expands active rules into a period, idempotently
//! - [`PeriodMigrator`] - copies recurring entries into a new period
//! - [`WalletResolver`] - resolves loose wallet references with retry
//! - [`BalanceAggregator`] - recomputes cached wallet balances

pub mod aggregator;
pub mod error;
pub mod materializer;
pub mod migrator;
pub mod resolver;
pub mod store;

pub use aggregator::BalanceAggregator;
pub use error::EngineError;
pub use materializer::{MaterializeReport, Materializer, SkippedRule};
pub use migrator::{MigrateReport, PeriodMigrator, SkippedEntry};
pub use resolver::WalletResolver;
pub use store::{LedgerStore, MemoryStore, PeriodStore, StoreError};
