//! Recurrence rules and window expansion.
//!
//! A recurrence rule describes a repeating obligation (rent due monthly,
//! groceries weekly). Expansion turns a rule into the concrete dates it
//! fires on inside one period's window.

pub mod error;
pub mod expand;
pub mod types;

#[cfg(test)]
mod expand_props;

pub use error::RuleError;
pub use expand::occurrences_in;
pub use types::{RecurrenceRule, Schedule};
