//! Budgeting periods.
//!
//! A period bounds one budgeting cycle with an inclusive date window.
//! Wallets and ledger entries are scoped to exactly one period; closed
//! periods are immutable history.

pub mod error;
pub mod types;

pub use error::PeriodError;
pub use types::Period;
