//! Core business logic for Moneta.
//!
//! This crate contains pure business logic with ZERO runtime or storage
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `dates` - Inclusive date windows and calendar math
//! - `period` - Budgeting periods
//! - `wallet` - Wallets, wallet references, and name resolution
//! - `recurrence` - Recurrence rules and window expansion
//! - `ledger` - Ledger entries and occurrence identity

pub mod dates;
pub mod ledger;
pub mod period;
pub mod recurrence;
pub mod wallet;
