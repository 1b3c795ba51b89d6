//! Recurrence rule error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors for invalid recurrence rules.
///
/// These are local to one rule: a run that hits them skips the rule,
/// records the skip, and keeps processing the remaining rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// Rule amount must be strictly positive.
    #[error("Rule amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Weekly rules index days 0 (Sunday) through 6 (Saturday).
    #[error("Day of week must be 0-6, got {0}")]
    InvalidDayOfWeek(u8),

    /// Monthly rules fire on calendar days 1 through 31.
    #[error("Day of month must be 1-31, got {0}")]
    InvalidDayOfMonth(u32),
}

impl RuleError {
    /// Returns the error code for reports and logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::InvalidDayOfWeek(_) => "INVALID_DAY_OF_WEEK",
            Self::InvalidDayOfMonth(_) => "INVALID_DAY_OF_MONTH",
        }
    }
}
